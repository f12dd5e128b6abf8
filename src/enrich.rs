// src/enrich.rs

use crate::config::EnrichmentConfig;
use crate::detect::{detect_marine_mismatch, detect_missing, Anomaly};
use crate::error::Result;
use crate::source::LookupSource;
use crate::table::{left_join, Table};
use tracing::info;

/// Column the marine-mismatch rule checks, added by the county lookup.
const MARINE_FLAG_COLUMN: &str = "marine";

/// Result of one enrichment run: the fully joined table plus the anomalies
/// detected on it.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentOutput {
    pub data: Table,
    pub anomalies: Vec<Anomaly>,
}

/// Joins every configured lookup onto `primary` in order, then runs the
/// configured detectors over the joined table.
///
/// Detection happens only after all joins: a later lookup may join on a
/// column added by an earlier one, and the required-column checks inspect
/// the final table. Marine-mismatch anomalies are emitted ahead of the
/// missing-value anomalies. Any fetch, join, or detector failure aborts the
/// run with no output.
#[tracing::instrument(
    level = "info",
    skip_all,
    fields(rows = primary.len(), lookups = config.lookups.len())
)]
pub fn enrich(
    primary: &Table,
    config: &EnrichmentConfig,
    source: &dyn LookupSource,
) -> Result<EnrichmentOutput> {
    let mut data = primary.clone();
    let mut required_lists: Vec<&[String]> = Vec::with_capacity(config.lookups.len());

    for spec in &config.lookups {
        let lookup = source.fetch_table(&spec.file_reference)?;
        data = left_join(&data, &lookup, &spec.join_column, &spec.columns_to_keep)?;
        required_lists.push(&spec.required);
        info!(
            lookup = %spec.name,
            lookup_rows = lookup.len(),
            rows = data.len(),
            "joined lookup"
        );
    }

    let mut anomalies: Vec<Anomaly> = Vec::new();
    for required in &required_lists {
        anomalies.extend(detect_missing(&data, required, &config.identifier_column)?);
    }

    if config.marine_mismatch_check {
        let marine = detect_marine_mismatch(
            &data,
            &config.survey_column,
            MARINE_FLAG_COLUMN,
            &config.period_column,
            &config.identifier_column,
        )?;
        // marine findings go ahead of the missing-value findings
        anomalies.splice(0..0, marine);
    }

    info!(
        rows = data.len(),
        anomalies = anomalies.len(),
        "enrichment complete"
    );
    Ok(EnrichmentOutput { data, anomalies })
}
