//! Raw record sources
//!
//! A `RecordSource` delivers the three watchlist sequences on startup and
//! on every refresh. Datasets are validated here, before they ever reach
//! `Searcher::reload`.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::model::{Address, AlternateIdentity, Sdn};

/// One complete delivery of watchlist records
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDataset {
    #[serde(default)]
    pub sdns: Vec<Sdn>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub alternate_identities: Vec<AlternateIdentity>,
}

impl RawDataset {
    /// Reject datasets the searcher cannot serve consistently: every
    /// record needs an entity ID, and SDN IDs must be unique.
    pub fn validate(&self) -> Result<(), SourceError> {
        let mut seen = HashSet::with_capacity(self.sdns.len());
        for (i, sdn) in self.sdns.iter().enumerate() {
            if sdn.entity_id.is_empty() {
                return Err(SourceError::Invalid(format!("sdn #{} has no entityID", i)));
            }
            if !seen.insert(sdn.entity_id.as_str()) {
                return Err(SourceError::Invalid(format!(
                    "duplicate sdn entityID {}",
                    sdn.entity_id
                )));
            }
        }

        if let Some(i) = self.addresses.iter().position(|a| a.entity_id.is_empty()) {
            return Err(SourceError::Invalid(format!("address #{} has no entityID", i)));
        }
        if let Some(i) = self
            .alternate_identities
            .iter()
            .position(|a| a.entity_id.is_empty())
        {
            return Err(SourceError::Invalid(format!(
                "alternate identity #{} has no entityID",
                i
            )));
        }

        Ok(())
    }
}

/// Errors that can occur while loading a dataset
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode dataset: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid dataset: {0}")]
    Invalid(String),
}

/// Supplier of raw watchlist records
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the current dataset
    async fn load(&self) -> Result<RawDataset, SourceError>;
}

/// Reads a JSON dataset document from disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn load(&self) -> Result<RawDataset, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Read {
                path: self.path.clone(),
                source,
            })?;
        let dataset: RawDataset = serde_json::from_slice(&bytes)?;

        tracing::debug!(
            path = %self.path.display(),
            sdns = dataset.sdns.len(),
            addresses = dataset.addresses.len(),
            alternate_identities = dataset.alternate_identities.len(),
            "Dataset read"
        );

        Ok(dataset)
    }
}
