// src/detect/mod.rs

mod marine;
mod missing;

pub use marine::detect_marine_mismatch;
pub use missing::detect_missing;

use crate::table::{Row, Table};
use serde_json::Value;

/// One flagged data-quality issue for one record.
///
/// Anomalies are ordinary output, not errors: the same identifier may appear
/// in several records and nothing is deduplicated. `context` carries the
/// extra columns a rule attaches (survey code, flag, period).
#[derive(Debug, Clone, PartialEq)]
pub struct Anomaly {
    pub identifier: Value,
    pub issue: String,
    pub context: Row,
}

impl Anomaly {
    pub fn new(identifier: Value, issue: impl Into<String>) -> Self {
        Self {
            identifier,
            issue: issue.into(),
            context: Row::new(),
        }
    }

    pub fn with_context(mut self, column: &str, value: Value) -> Self {
        self.context.insert(column.to_string(), value);
        self
    }
}

/// Converts anomaly records to a table, re-keying each identifier under
/// `identifier_column` so the output lines up with the enriched data.
pub fn anomalies_to_table(anomalies: &[Anomaly], identifier_column: &str) -> Table {
    let rows = anomalies
        .iter()
        .map(|anomaly| {
            let mut row = Row::new();
            row.insert(identifier_column.to_string(), anomaly.identifier.clone());
            row.insert("issue".to_string(), Value::String(anomaly.issue.clone()));
            for (column, value) in &anomaly.context {
                row.insert(column.clone(), value.clone());
            }
            row
        })
        .collect();
    Table::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_anomalies_to_table_keys_identifier_column() {
        let anomalies = vec![
            Anomaly::new(json!(123), "county missing in lookup."),
            Anomaly::new(json!(666), "Reference should not produce marine data.")
                .with_context("marine", json!("n"))
                .with_context("period", json!("201809")),
        ];

        let t = anomalies_to_table(&anomalies, "responder_id");
        assert_eq!(t.len(), 2);
        assert_eq!(t.rows()[0].get("responder_id"), Some(&json!(123)));
        assert_eq!(
            t.rows()[0].get("issue"),
            Some(&json!("county missing in lookup."))
        );
        assert_eq!(t.rows()[1].get("marine"), Some(&json!("n")));
        assert_eq!(t.rows()[1].get("period"), Some(&json!("201809")));
    }

    #[test]
    fn test_anomalies_to_table_empty() {
        let t = anomalies_to_table(&[], "responder_id");
        assert!(t.is_empty());
    }
}
