// src/lib.rs

//! Data-enrichment stage for the survey results pipeline.
//!
//! Joins configured reference lookups onto a primary dataset by key, then
//! flags records that are missing required enrichment data or that break
//! cross-column business rules. Anomalies are ordinary output, not errors;
//! any operational failure aborts the run with no partial result.

pub mod config;
pub mod detect;
pub mod enrich;
pub mod error;
pub mod source;
pub mod table;

pub use config::{EnrichmentConfig, LookupSpec};
pub use detect::{anomalies_to_table, detect_marine_mismatch, detect_missing, Anomaly};
pub use enrich::{enrich, EnrichmentOutput};
pub use error::{EnrichmentError, Result};
pub use source::{DirLookupSource, LookupSource};
pub use table::{left_join, Row, Table};
