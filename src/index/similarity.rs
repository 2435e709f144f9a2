//! Jaro-Winkler similarity scoring
//!
//! `strsim::jaro_winkler` applies the Winkler prefix boost only when the
//! base Jaro similarity exceeds 0.7 and considers at most 4 prefix
//! characters, which are the parameters the watchlist ranking is tuned for.

/// Score a stored record field against a query.
///
/// Both arguments must already be normalized. The record side goes first,
/// the query side second; keep that order so results are reproducible.
pub fn score(record: &str, query: &str) -> f64 {
    strsim::jaro_winkler(record, query)
}
