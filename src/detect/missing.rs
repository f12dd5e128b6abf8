// src/detect/missing.rs

use super::Anomaly;
use crate::error::{EnrichmentError, Result};
use crate::table::{is_missing, Table};
use serde_json::Value;
use tracing::debug;

/// Flags every record whose value is missing for one of `columns_to_check`.
///
/// A record missing two checked columns emits two records, one per column;
/// output is grouped by column in input order, rows in table order. An empty
/// table yields no anomalies and no error.
pub fn detect_missing(
    table: &Table,
    columns_to_check: &[String],
    identifier_column: &str,
) -> Result<Vec<Anomaly>> {
    if table.is_empty() {
        return Ok(Vec::new());
    }
    if !table.has_column(identifier_column) {
        return Err(EnrichmentError::DataShape(format!(
            "identifier column `{identifier_column}` not present in table"
        )));
    }

    let mut anomalies = Vec::new();
    for column in columns_to_check {
        if !table.has_column(column) {
            return Err(EnrichmentError::DataShape(format!(
                "checked column `{column}` not present in table"
            )));
        }
        for row in table.rows() {
            if is_missing(row.get(column)) {
                let identifier = row.get(identifier_column).cloned().unwrap_or(Value::Null);
                anomalies.push(Anomaly::new(
                    identifier,
                    format!("{column} missing in lookup."),
                ));
            }
        }
    }

    debug!(
        columns = columns_to_check.len(),
        anomalies = anomalies.len(),
        "missing-value detection complete"
    );
    Ok(anomalies)
}
