//! Searchable record wrappers
//!
//! Each record pairs a shared raw watchlist payload with its normalized,
//! comparison-ready text and a match score slot. The score is only ever
//! written on copies handed back from a ranking query.
//!
//! Records render as the flattened raw payload plus a `match` field:
//!
//! ```json
//! { "entityID": "306", "sdnName": "BANCO NACIONAL DE CUBA", ..., "match": 0.93 }
//! ```

use serde::Serialize;
use std::sync::Arc;

use crate::index::normalize::normalize;
use crate::model::{Address, AlternateIdentity, Sdn};

/// Common shape of the three record kinds, used by the generic scan and
/// ranking routines in the searcher.
pub trait SearchRecord: Clone {
    /// The raw payload this record wraps
    type Raw;

    /// Shared handle to the raw payload
    fn raw(&self) -> &Arc<Self::Raw>;

    /// Identifier of the SDN this record belongs to
    fn entity_id(&self) -> &str;

    /// Normalized text consulted by fuzzy ranking
    fn search_text(&self) -> &str;

    /// Attach a match score (only called on copies)
    fn set_match(&mut self, score: f64);
}

/// An SDN with its normalized name
#[derive(Debug, Clone, Serialize)]
pub struct SdnRecord {
    #[serde(flatten)]
    sdn: Arc<Sdn>,
    #[serde(rename = "match")]
    match_score: f64,
    #[serde(skip)]
    name: String,
}

impl SdnRecord {
    pub fn new(sdn: Sdn) -> Self {
        let name = normalize(&sdn.sdn_name);
        Self {
            sdn: Arc::new(sdn),
            match_score: 0.0,
            name,
        }
    }

    pub fn sdn(&self) -> &Sdn {
        &self.sdn
    }

    pub fn match_score(&self) -> f64 {
        self.match_score
    }

    pub fn normalized_name(&self) -> &str {
        &self.name
    }
}

impl SearchRecord for SdnRecord {
    type Raw = Sdn;

    fn raw(&self) -> &Arc<Sdn> {
        &self.sdn
    }

    fn entity_id(&self) -> &str {
        &self.sdn.entity_id
    }

    fn search_text(&self) -> &str {
        &self.name
    }

    fn set_match(&mut self, score: f64) {
        self.match_score = score;
    }
}

/// An address with normalized street, city/state/postal and country.
///
/// Ranking consults the street only.
#[derive(Debug, Clone, Serialize)]
pub struct AddressRecord {
    #[serde(flatten)]
    address: Arc<Address>,
    #[serde(rename = "match")]
    match_score: f64,
    #[serde(skip)]
    street: String,
    #[serde(skip)]
    city_state: String,
    #[serde(skip)]
    country: String,
}

impl AddressRecord {
    pub fn new(address: Address) -> Self {
        let street = normalize(&address.address);
        let city_state = normalize(&address.city_state_province_postal_code);
        let country = normalize(&address.country);
        Self {
            address: Arc::new(address),
            match_score: 0.0,
            street,
            city_state,
            country,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn match_score(&self) -> f64 {
        self.match_score
    }

    pub fn normalized_street(&self) -> &str {
        &self.street
    }

    pub fn normalized_city_state(&self) -> &str {
        &self.city_state
    }

    pub fn normalized_country(&self) -> &str {
        &self.country
    }
}

impl SearchRecord for AddressRecord {
    type Raw = Address;

    fn raw(&self) -> &Arc<Address> {
        &self.address
    }

    fn entity_id(&self) -> &str {
        &self.address.entity_id
    }

    fn search_text(&self) -> &str {
        &self.street
    }

    fn set_match(&mut self, score: f64) {
        self.match_score = score;
    }
}

/// An alternate identity with its normalized name
#[derive(Debug, Clone, Serialize)]
pub struct AltNameRecord {
    #[serde(flatten)]
    alt: Arc<AlternateIdentity>,
    #[serde(rename = "match")]
    match_score: f64,
    #[serde(skip)]
    name: String,
}

impl AltNameRecord {
    pub fn new(alt: AlternateIdentity) -> Self {
        let name = normalize(&alt.alternate_name);
        Self {
            alt: Arc::new(alt),
            match_score: 0.0,
            name,
        }
    }

    pub fn alternate_identity(&self) -> &AlternateIdentity {
        &self.alt
    }

    pub fn match_score(&self) -> f64 {
        self.match_score
    }

    pub fn normalized_name(&self) -> &str {
        &self.name
    }
}

impl SearchRecord for AltNameRecord {
    type Raw = AlternateIdentity;

    fn raw(&self) -> &Arc<AlternateIdentity> {
        &self.alt
    }

    fn entity_id(&self) -> &str {
        &self.alt.entity_id
    }

    fn search_text(&self) -> &str {
        &self.name
    }

    fn set_match(&mut self, score: f64) {
        self.match_score = score;
    }
}

/// Wrap raw SDNs, preserving input order.
pub fn build_entities(sdns: impl IntoIterator<Item = Sdn>) -> Vec<SdnRecord> {
    sdns.into_iter().map(SdnRecord::new).collect()
}

/// Wrap raw addresses, preserving input order.
pub fn build_addresses(addresses: impl IntoIterator<Item = Address>) -> Vec<AddressRecord> {
    addresses.into_iter().map(AddressRecord::new).collect()
}

/// Wrap raw alternate identities, preserving input order.
pub fn build_alternate_names(
    alts: impl IntoIterator<Item = AlternateIdentity>,
) -> Vec<AltNameRecord> {
    alts.into_iter().map(AltNameRecord::new).collect()
}
