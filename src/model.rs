//! Raw watchlist records
//!
//! These mirror the published sanctions list JSON as delivered by the
//! record source. They are never mutated once loaded; the search index
//! wraps them in `Arc` and shares them between snapshots and results.

use serde::{Deserialize, Serialize};

/// A Specially Designated National (sanctioned party)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sdn {
    #[serde(rename = "entityID")]
    pub entity_id: String,
    #[serde(rename = "sdnName")]
    pub sdn_name: String,
    #[serde(rename = "sdnType", default)]
    pub sdn_type: String,
    #[serde(default)]
    pub programs: Vec<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub call_sign: String,
    #[serde(default)]
    pub vessel_type: String,
    #[serde(default)]
    pub tonnage: String,
    #[serde(default)]
    pub gross_registered_tonnage: String,
    #[serde(default)]
    pub vessel_flag: String,
    #[serde(default)]
    pub vessel_owner: String,
    #[serde(default)]
    pub remarks: String,
}

/// A physical address tied to an SDN
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "entityID")]
    pub entity_id: String,
    #[serde(rename = "addressID", default)]
    pub address_id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city_state_province_postal_code: String,
    #[serde(default)]
    pub country: String,
}

/// An alias or alternate identity tied to an SDN
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternateIdentity {
    #[serde(rename = "entityID")]
    pub entity_id: String,
    #[serde(rename = "alternateID", default)]
    pub alternate_id: String,
    #[serde(default)]
    pub alternate_type: String,
    #[serde(default)]
    pub alternate_name: String,
    #[serde(default)]
    pub alternate_remarks: String,
}
