//! Sanctions Search - in-memory watchlist screening core
//!
//! Ranks sanctions watchlist records (SDNs, their addresses and alternate
//! names) by Jaro-Winkler similarity to a query, and serves exact lookups
//! by entity ID. The whole dataset lives in memory and is swapped out
//! atomically on every refresh while queries keep running.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Consumers: request handlers (limit clamped via ResultLimits)  │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Searcher                                │
//! │   SDNs / Addresses / Alt names under one RwLock snapshot        │
//! │   normalize -> jaro_winkler -> Largest<T> (top-K)               │
//! └─────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ reload
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   Refresh Pipeline                              │
//! │          (RecordSource -> validate -> reload)                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use sanctions_search::{JsonFileSource, RefreshPipeline, SearchConfig, Searcher};
//!
//! let config = SearchConfig::from_file("config/sanctions_search.yaml")?;
//! let searcher = Arc::new(Searcher::new());
//!
//! let pipeline = RefreshPipeline::new(Arc::new(JsonFileSource::new(&config.source.path)));
//! pipeline.refresh(&searcher).await?;
//!
//! let limit = config.limits.extract(Some("25"));
//! let hits = searcher.rank_entities("nicolas maduro", limit);
//! ```

pub mod config;
pub mod index;
pub mod limits;
pub mod model;
pub mod refresh;

// Re-export main types
pub use config::{ConfigError, SearchConfig, StartupMode};
pub use index::{
    normalize, AddressRecord, AltNameRecord, IndexStats, Largest, SdnRecord, SearchRecord,
    Searcher,
};
pub use limits::ResultLimits;
pub use model::{Address, AlternateIdentity, Sdn};
pub use refresh::{
    run_refresh_loop, JsonFileSource, RawDataset, RecordSource, RefreshPipeline, SourceError,
};
