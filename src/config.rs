// src/config.rs

use crate::error::{EnrichmentError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for one lookup join.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupSpec {
    /// Short name used in logs.
    pub name: String,

    /// Key handed to the lookup source to retrieve the table
    /// (for the directory source: a file name).
    pub file_reference: String,

    /// Column present in both tables, matched on.
    pub join_column: String,

    /// Lookup columns that survive the join; must include the join column.
    pub columns_to_keep: Vec<String>,

    /// Output columns that must be non-null once every join has run.
    #[serde(default)]
    pub required: Vec<String>,
}

/// Configuration for one enrichment run.
///
/// `lookups` is ordered: joins run front to back, and a later lookup may
/// join on a column added by an earlier one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichmentConfig {
    /// Column holding each record's unique key (usually the responder id).
    pub identifier_column: String,

    /// Column holding the reporting period.
    pub period_column: String,

    /// Column holding the survey code.
    pub survey_column: String,

    /// Enables the marine-mismatch rule over the joined table.
    #[serde(default)]
    pub marine_mismatch_check: bool,

    pub lookups: Vec<LookupSpec>,
}

impl EnrichmentConfig {
    /// Loads and validates a pipeline config from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            EnrichmentError::Configuration(format!("reading config `{}`: {e}", path.display()))
        })?;
        let config: Self = serde_yaml::from_str(&text).map_err(|e| {
            EnrichmentError::Configuration(format!("parsing config `{}`: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects structurally invalid configuration before any data is touched.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("identifier_column", &self.identifier_column),
            ("period_column", &self.period_column),
            ("survey_column", &self.survey_column),
        ] {
            if value.is_empty() {
                return Err(EnrichmentError::Configuration(format!(
                    "`{field}` must not be empty"
                )));
            }
        }

        for spec in &self.lookups {
            for (field, value) in [
                ("name", &spec.name),
                ("file_reference", &spec.file_reference),
                ("join_column", &spec.join_column),
            ] {
                if value.is_empty() {
                    return Err(EnrichmentError::Configuration(format!(
                        "lookup `{}`: `{field}` must not be empty",
                        spec.name
                    )));
                }
            }
            if !spec.columns_to_keep.iter().any(|c| c == &spec.join_column) {
                return Err(EnrichmentError::Configuration(format!(
                    "lookup `{}`: columns_to_keep must include join column `{}`",
                    spec.name, spec.join_column
                )));
            }
        }

        Ok(())
    }
}
