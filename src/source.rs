// src/source.rs

use crate::error::{EnrichmentError, Result};
use crate::table::Table;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Retrieval collaborator for lookup tables.
///
/// The orchestrator fetches each configured lookup through this seam; where
/// the tables actually live (object store, local disk) is the caller's
/// concern. Failures abort the run as [`EnrichmentError::Fetch`].
pub trait LookupSource {
    fn fetch_table(&self, reference: &str) -> Result<Table>;
}

/// Lookup tables stored as row-oriented JSON files under one directory,
/// addressed by file name.
#[derive(Debug, Clone)]
pub struct DirLookupSource {
    root: PathBuf,
}

impl DirLookupSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl LookupSource for DirLookupSource {
    fn fetch_table(&self, reference: &str) -> Result<Table> {
        let path = self.root.join(reference);
        let text = fs::read_to_string(&path).map_err(|e| EnrichmentError::Fetch {
            reference: reference.to_string(),
            message: format!("{}: {e}", path.display()),
        })?;
        let table = Table::from_json(&text).map_err(|e| EnrichmentError::Fetch {
            reference: reference.to_string(),
            message: format!("malformed lookup JSON: {e}"),
        })?;
        debug!(reference, rows = table.len(), "fetched lookup table");
        Ok(table)
    }
}
