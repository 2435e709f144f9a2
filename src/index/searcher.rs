//! In-memory watchlist searcher
//!
//! Holds SDNs, addresses and alternate names as a single immutable
//! snapshot behind one reader/writer lock. Queries take shared access for
//! their whole scan; `reload` builds nothing under the lock and only swaps
//! the snapshot pointer under exclusive access, so readers never observe
//! collections from two different loads.
//!
//! All operations are synchronous and CPU-bound. Share a `Searcher`
//! between request handlers with `Arc`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::index::normalize::normalize;
use crate::index::records::{AddressRecord, AltNameRecord, SdnRecord, SearchRecord};
use crate::index::similarity::score;
use crate::index::top_k::Largest;
use crate::model::{Address, AlternateIdentity, Sdn};

/// One consistent generation of the dataset
#[derive(Debug, Default)]
struct Snapshot {
    version: u64,
    loaded_at: Option<DateTime<Utc>>,
    sdns: Vec<SdnRecord>,
    addresses: Vec<AddressRecord>,
    alts: Vec<AltNameRecord>,
}

/// Summary of the currently installed dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    /// Incremented by one on every reload; 0 before the first
    pub version: u64,
    pub sdns: usize,
    pub addresses: usize,
    pub alternate_names: usize,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    fn stats(&self) -> IndexStats {
        IndexStats {
            version: self.version,
            sdns: self.sdns.len(),
            addresses: self.addresses.len(),
            alternate_names: self.alts.len(),
            loaded_at: self.loaded_at,
        }
    }
}

/// Fuzzy and exact search over the watchlist
#[derive(Debug, Default)]
pub struct Searcher {
    snapshot: RwLock<Arc<Snapshot>>,
    ready: AtomicBool,
}

impl Searcher {
    /// Create an empty searcher. Queries return nothing until the first
    /// `reload`.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Arc<Snapshot>> {
        // snapshots are replaced whole, so a poisoned lock still guards a consistent one
        self.snapshot.read().unwrap_or_else(|poisoned| {
            tracing::warn!("searcher lock poisoned, continuing with last snapshot");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arc<Snapshot>> {
        self.snapshot.write().unwrap_or_else(|poisoned| {
            tracing::warn!("searcher lock poisoned, continuing with last snapshot");
            poisoned.into_inner()
        })
    }

    /// Find the SDN with the given entity ID. First match wins.
    pub fn find_entity_by_id(&self, id: &str) -> Option<Arc<Sdn>> {
        let snapshot = self.read();
        snapshot
            .sdns
            .iter()
            .find(|record| record.entity_id() == id)
            .map(|record| Arc::clone(record.raw()))
    }

    /// Addresses belonging to `id`, at most `limit`, in load order.
    pub fn find_addresses_by_entity_id(&self, id: &str, limit: usize) -> Vec<Arc<Address>> {
        let snapshot = self.read();
        find_by_entity_id(&snapshot.addresses, id, limit)
    }

    /// Alternate identities belonging to `id`, at most `limit`, in load order.
    pub fn find_alternate_names_by_entity_id(
        &self,
        id: &str,
        limit: usize,
    ) -> Vec<Arc<AlternateIdentity>> {
        let snapshot = self.read();
        find_by_entity_id(&snapshot.alts, id, limit)
    }

    /// Top `limit` SDNs by name similarity to `query`, best first.
    pub fn rank_entities(&self, query: &str, limit: usize) -> Vec<SdnRecord> {
        let query = normalize(query);
        let snapshot = self.read();
        rank(&snapshot.sdns, &query, limit)
    }

    /// Top `limit` addresses by street similarity to `query`, best first.
    pub fn rank_addresses(&self, query: &str, limit: usize) -> Vec<AddressRecord> {
        let query = normalize(query);
        let snapshot = self.read();
        rank(&snapshot.addresses, &query, limit)
    }

    /// Top `limit` alternate names by similarity to `query`, best first.
    pub fn rank_alternate_names(&self, query: &str, limit: usize) -> Vec<AltNameRecord> {
        let query = normalize(query);
        let snapshot = self.read();
        rank(&snapshot.alts, &query, limit)
    }

    /// Atomically replace all three collections.
    ///
    /// Readers already scanning keep the snapshot they started with; any
    /// query that starts after this returns sees only the new data.
    pub fn reload(
        &self,
        sdns: Vec<SdnRecord>,
        addresses: Vec<AddressRecord>,
        alts: Vec<AltNameRecord>,
    ) -> IndexStats {
        let loaded_at = Some(Utc::now());

        let stats = {
            let mut current = self.write();
            let next = Snapshot {
                version: current.version + 1,
                loaded_at,
                sdns,
                addresses,
                alts,
            };
            let stats = next.stats();
            *current = Arc::new(next);
            stats
        };
        self.ready.store(true, Ordering::SeqCst);

        tracing::info!(
            version = stats.version,
            sdns = stats.sdns,
            addresses = stats.addresses,
            alternate_names = stats.alternate_names,
            "Searcher reloaded"
        );

        stats
    }

    /// True once the first dataset has been installed
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    pub fn stats(&self) -> IndexStats {
        self.read().stats()
    }
}

fn find_by_entity_id<R: SearchRecord>(records: &[R], id: &str, limit: usize) -> Vec<Arc<R::Raw>> {
    records
        .iter()
        .filter(|record| record.entity_id() == id)
        .take(limit)
        .map(|record| Arc::clone(record.raw()))
        .collect()
}

/// Score every record against an already-normalized query and return
/// copies of the best `limit` with their match set.
fn rank<R: SearchRecord>(records: &[R], query: &str, limit: usize) -> Vec<R> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut xs = Largest::new(limit);
    for record in records {
        xs.offer(record, score(record.search_text(), query));
    }

    xs.into_sorted()
        .into_iter()
        .map(|(record, weight)| {
            let mut out = record.clone();
            out.set_match(weight);
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::records::{build_addresses, build_alternate_names, build_entities};

    fn sdn(id: &str, name: &str) -> Sdn {
        Sdn {
            entity_id: id.to_string(),
            sdn_name: name.to_string(),
            ..Default::default()
        }
    }

    fn address(id: &str, street: &str) -> Address {
        Address {
            entity_id: id.to_string(),
            address: street.to_string(),
            ..Default::default()
        }
    }

    fn alt(id: &str, name: &str) -> AlternateIdentity {
        AlternateIdentity {
            entity_id: id.to_string(),
            alternate_name: name.to_string(),
            ..Default::default()
        }
    }

    fn loaded(sdns: Vec<Sdn>, addresses: Vec<Address>, alts: Vec<AlternateIdentity>) -> Searcher {
        let searcher = Searcher::new();
        searcher.reload(
            build_entities(sdns),
            build_addresses(addresses),
            build_alternate_names(alts),
        );
        searcher
    }

    #[test]
    fn test_not_ready_initially() {
        let searcher = Searcher::new();
        assert!(!searcher.is_ready());
        assert_eq!(searcher.stats().version, 0);
        assert!(searcher.stats().loaded_at.is_none());
    }

    #[test]
    fn test_reload_makes_ready() {
        let searcher = loaded(vec![sdn("1", "John Smith")], vec![], vec![]);
        assert!(searcher.is_ready());

        let stats = searcher.stats();
        assert_eq!(stats.version, 1);
        assert_eq!(stats.sdns, 1);
        assert!(stats.loaded_at.is_some());
    }

    #[test]
    fn test_rank_exact_match_scores_one() {
        let searcher = loaded(vec![sdn("1", "John Smith")], vec![], vec![]);

        let results = searcher.rank_entities("John Smith", 10);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_score(), 1.0);
        assert_eq!(results[0].sdn().entity_id, "1");
    }

    #[test]
    fn test_rank_partial_match() {
        let searcher = loaded(vec![sdn("1", "Johnathon Smith")], vec![], vec![]);

        let results = searcher.rank_entities("John Smith", 1);

        assert_eq!(results.len(), 1);
        let s = results[0].match_score();
        assert!(s > 0.7 && s < 1.0, "unexpected score {}", s);
    }

    #[test]
    fn test_rank_empty_collection() {
        let searcher = Searcher::new();
        assert!(searcher.rank_entities("anything", 10).is_empty());
        assert!(searcher.rank_addresses("anything", 10).is_empty());
        assert!(searcher.rank_alternate_names("anything", 10).is_empty());
    }

    #[test]
    fn test_rank_orders_best_first_and_limits() {
        let searcher = loaded(
            vec![
                sdn("1", "Kim Jong Un"),
                sdn("2", "John Smith"),
                sdn("3", "Jon Smith"),
                sdn("4", "Banco Nacional de Cuba"),
            ],
            vec![],
            vec![],
        );

        let results = searcher.rank_entities("john smith", 2);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].sdn().entity_id, "2");
        assert_eq!(results[1].sdn().entity_id, "3");
        assert!(results[0].match_score() >= results[1].match_score());
    }

    #[test]
    fn test_rank_does_not_touch_stored_records() {
        let searcher = loaded(vec![sdn("1", "John Smith")], vec![], vec![]);

        let _ = searcher.rank_entities("John Smith", 10);
        let again = searcher.rank_entities("zzzz", 10);

        assert_eq!(again.len(), 1);
        assert!(again[0].match_score() < 1.0);
    }

    #[test]
    fn test_rank_zero_limit() {
        let searcher = loaded(vec![sdn("1", "John Smith")], vec![], vec![]);
        assert!(searcher.rank_entities("John Smith", 0).is_empty());
    }

    #[test]
    fn test_find_entity_by_id() {
        let searcher = loaded(
            vec![sdn("1", "John Smith"), sdn("2", "Jane Doe")],
            vec![],
            vec![],
        );

        let found = searcher.find_entity_by_id("2").unwrap();
        assert_eq!(found.sdn_name, "Jane Doe");
        assert!(searcher.find_entity_by_id("3").is_none());
    }

    #[test]
    fn test_find_addresses_shared_entity() {
        let searcher = loaded(
            vec![sdn("42", "John Smith")],
            vec![
                address("42", "1 Main St"),
                address("7", "9 Elm St"),
                address("42", "2 High St"),
            ],
            vec![],
        );

        let found = searcher.find_addresses_by_entity_id("42", 10);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].address, "1 Main St");
        assert_eq!(found[1].address, "2 High St");
    }

    #[test]
    fn test_find_respects_limit_exactly() {
        let alts = (0..5).map(|i| alt("42", &format!("alias {}", i))).collect();
        let searcher = loaded(vec![], vec![], alts);

        assert_eq!(searcher.find_alternate_names_by_entity_id("42", 3).len(), 3);
        assert!(searcher.find_alternate_names_by_entity_id("42", 0).is_empty());
        assert!(searcher.find_alternate_names_by_entity_id("1", 10).is_empty());
    }

    #[test]
    fn test_rank_addresses_uses_street() {
        let searcher = loaded(
            vec![],
            vec![
                Address {
                    entity_id: "1".to_string(),
                    address: "Calle 23".to_string(),
                    city_state_province_postal_code: "Main Street".to_string(),
                    ..Default::default()
                },
                address("2", "Main Street"),
            ],
            vec![],
        );

        let results = searcher.rank_addresses("main street", 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].address().entity_id, "2");
        assert_eq!(results[0].match_score(), 1.0);
    }

    #[test]
    fn test_rank_alternate_names() {
        let searcher = loaded(
            vec![],
            vec![],
            vec![alt("1", "El Chapo"), alt("2", "National Bank of Cuba")],
        );

        let results = searcher.rank_alternate_names("NATIONAL BANK OF CUBA.", 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].alternate_identity().entity_id, "2");
        assert_eq!(results[0].match_score(), 1.0);
    }

    #[test]
    fn test_reload_replaces_everything() {
        let searcher = loaded(
            vec![sdn("1", "Old Name")],
            vec![address("1", "Old Street")],
            vec![alt("1", "Old Alias")],
        );

        let stats = searcher.reload(build_entities(vec![sdn("2", "New Name")]), vec![], vec![]);

        assert_eq!(stats.version, 2);
        assert!(searcher.find_entity_by_id("1").is_none());
        assert!(searcher.find_entity_by_id("2").is_some());
        assert!(searcher.find_addresses_by_entity_id("1", 10).is_empty());
        assert!(searcher.rank_alternate_names("old alias", 10).is_empty());
    }
}
