// src/table/mod.rs

mod merge;

pub use merge::left_join;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// A single record: column name → scalar value.
pub type Row = serde_json::Map<String, Value>;

/// An ordered, row-oriented table.
///
/// The serialized form is a row-oriented JSON array (`[{"col": val, ...}]`),
/// the wire format the surrounding pipeline passes between stages. A column
/// is present in the table if any row carries the key; a value is missing
/// for a row when the key is absent or the value is null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Union of column names across all rows.
    pub fn columns(&self) -> BTreeSet<&str> {
        self.rows
            .iter()
            .flat_map(|row| row.keys().map(String::as_str))
            .collect()
    }

    /// True if any row carries `column`.
    pub fn has_column(&self, column: &str) -> bool {
        self.rows.iter().any(|row| row.contains_key(column))
    }

    /// Parses a row-oriented JSON array.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Serializes back to a row-oriented JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// True when `value` counts as missing: no key, or an explicit null.
pub(crate) fn is_missing(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(value: serde_json::Value) -> Table {
        serde_json::from_value(value).expect("test table should deserialize")
    }

    #[test]
    fn test_from_json_row_oriented() {
        let t = Table::from_json(r#"[{"responder_id": 1, "county": "7"}, {"responder_id": 2}]"#)
            .unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.rows()[0].get("county"), Some(&json!("7")));
        assert!(t.rows()[1].get("county").is_none());
    }

    #[test]
    fn test_columns_are_union_of_row_keys() {
        let t = table(json!([
            {"responder_id": 1, "county": "7"},
            {"responder_id": 2, "region": "North"}
        ]));
        let columns = t.columns();
        assert!(columns.contains("responder_id"));
        assert!(columns.contains("county"));
        assert!(columns.contains("region"));
        assert!(t.has_column("region"));
        assert!(!t.has_column("marine"));
    }

    #[test]
    fn test_missing_values() {
        let t = table(json!([{"county": null}, {"region": "North"}]));
        assert!(is_missing(t.rows()[0].get("county")));
        assert!(is_missing(t.rows()[1].get("county")));
        assert!(!is_missing(t.rows()[1].get("region")));
    }
}
