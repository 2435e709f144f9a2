//! Watchlist search index
//!
//! Leaves first: [`normalize`] and [`similarity`] are pure functions,
//! [`top_k`] is the per-query selector, [`records`] wraps raw payloads with
//! precomputed text, and [`searcher`] owns the collections and the lock.

pub mod normalize;
pub mod records;
pub mod searcher;
pub mod similarity;
pub mod top_k;

pub use normalize::normalize;
pub use records::{
    build_addresses, build_alternate_names, build_entities, AddressRecord, AltNameRecord,
    SdnRecord, SearchRecord,
};
pub use searcher::{IndexStats, Searcher};
pub use similarity::score;
pub use top_k::Largest;
