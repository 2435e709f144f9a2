//! Dataset refresh
//!
//! Sources deliver raw watchlist records; the pipeline validates them and
//! installs them into a [`Searcher`](crate::index::Searcher) in one reload.

pub mod pipeline;
pub mod source;

pub use pipeline::{run_refresh_loop, RefreshPipeline};
pub use source::{JsonFileSource, RawDataset, RecordSource, SourceError};
