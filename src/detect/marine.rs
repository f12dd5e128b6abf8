// src/detect/marine.rs

use super::Anomaly;
use crate::error::{EnrichmentError, Result};
use crate::table::Table;
use serde_json::Value;
use tracing::debug;

/// Survey code of the sand & gravel marine survey.
const MARINE_SURVEY_CODE: &str = "076";
/// Flag value meaning the joined county does not produce marine data.
const NO_MARINE_FLAG: &str = "n";

/// Flags references reporting under the marine survey whose joined county
/// flag says they should not produce marine data.
///
/// A record selects when `survey_column == "076"` and `flag_column == "n"`,
/// both case-sensitive exact matches. A missing or null flag value never
/// selects, so references without a county match fall through to the
/// missing-value check instead of tripping this rule.
pub fn detect_marine_mismatch(
    table: &Table,
    survey_column: &str,
    flag_column: &str,
    period_column: &str,
    identifier_column: &str,
) -> Result<Vec<Anomaly>> {
    if table.is_empty() {
        return Ok(Vec::new());
    }
    for column in [survey_column, period_column, identifier_column] {
        if !table.has_column(column) {
            return Err(EnrichmentError::DataShape(format!(
                "column `{column}` not present in table"
            )));
        }
    }

    let mut anomalies = Vec::new();
    for row in table.rows() {
        let survey_matches =
            matches!(row.get(survey_column), Some(Value::String(s)) if s == MARINE_SURVEY_CODE);
        let flag_matches =
            matches!(row.get(flag_column), Some(Value::String(s)) if s == NO_MARINE_FLAG);
        if survey_matches && flag_matches {
            let value = |column: &str| row.get(column).cloned().unwrap_or(Value::Null);
            anomalies.push(
                Anomaly::new(
                    value(identifier_column),
                    "Reference should not produce marine data.",
                )
                .with_context(survey_column, value(survey_column))
                .with_context(flag_column, value(flag_column))
                .with_context(period_column, value(period_column)),
            );
        }
    }

    debug!(anomalies = anomalies.len(), "marine-mismatch detection complete");
    Ok(anomalies)
}
