// src/table/merge.rs

use super::{Row, Table};
use crate::error::{EnrichmentError, Result};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Left outer join of `lookup` onto `primary`, keyed on `join_column`.
///
/// The lookup is projected down to `columns_to_keep` (which must include the
/// join column) before joining. Every primary row is preserved: unmatched
/// rows get an explicit null for each kept column, and rows matching several
/// lookup entries fan out, one output row per match, in lookup order.
///
/// Join keys compare by JSON value equality; a null key matches a null key,
/// and a primary row without the join key joins as null.
pub fn left_join(
    primary: &Table,
    lookup: &Table,
    join_column: &str,
    columns_to_keep: &[String],
) -> Result<Table> {
    if !columns_to_keep.iter().any(|c| c == join_column) {
        return Err(EnrichmentError::Configuration(format!(
            "join column `{join_column}` is not in columns_to_keep"
        )));
    }
    // An empty lookup has no columns, so this also rejects joining against one.
    for column in columns_to_keep {
        if !lookup.has_column(column) {
            return Err(EnrichmentError::Configuration(format!(
                "column `{column}` not present in lookup table"
            )));
        }
    }

    if primary.is_empty() {
        return Ok(Table::default());
    }
    if !primary.has_column(join_column) {
        return Err(EnrichmentError::Configuration(format!(
            "join column `{join_column}` not present in primary table"
        )));
    }

    let kept: Vec<&str> = columns_to_keep
        .iter()
        .map(String::as_str)
        .filter(|c| *c != join_column)
        .collect();
    for column in &kept {
        if primary.has_column(column) {
            return Err(EnrichmentError::Configuration(format!(
                "lookup column `{column}` already present in primary table"
            )));
        }
    }

    // Index lookup rows by join key. Value has no Hash impl, so the
    // serialized form stands in; it distinguishes "1" from 1 and null.
    let mut index: HashMap<String, Vec<&Row>> = HashMap::new();
    for row in lookup.rows() {
        let key = row.get(join_column).unwrap_or(&Value::Null).to_string();
        index.entry(key).or_default().push(row);
    }

    let mut out: Vec<Row> = Vec::with_capacity(primary.len());
    for row in primary.rows() {
        let key = row.get(join_column).unwrap_or(&Value::Null).to_string();
        match index.get(&key) {
            Some(matches) => {
                for matched in matches {
                    let mut joined = row.clone();
                    for column in &kept {
                        let value = matched.get(*column).cloned().unwrap_or(Value::Null);
                        joined.insert((*column).to_string(), value);
                    }
                    out.push(joined);
                }
            }
            None => {
                let mut joined = row.clone();
                for column in &kept {
                    joined.insert((*column).to_string(), Value::Null);
                }
                out.push(joined);
            }
        }
    }

    debug!(
        join_column,
        rows_in = primary.len(),
        rows_out = out.len(),
        "left join complete"
    );
    Ok(Table::new(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(value: serde_json::Value) -> Table {
        serde_json::from_value(value).expect("test table should deserialize")
    }

    fn keep(columns: &[&str]) -> Vec<String> {
        columns.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_left_join_preserves_every_primary_row() {
        let primary = table(json!([
            {"responder_id": 1, "value": 10},
            {"responder_id": 2, "value": 20},
            {"responder_id": 3, "value": 30}
        ]));
        let lookup = table(json!([
            {"responder_id": 1, "county": "7"},
            {"responder_id": 2, "county": "8"}
        ]));

        let joined = left_join(
            &primary,
            &lookup,
            "responder_id",
            &keep(&["responder_id", "county"]),
        )
        .unwrap();

        assert_eq!(joined.len(), 3);
        assert_eq!(joined.rows()[0].get("county"), Some(&json!("7")));
        assert_eq!(joined.rows()[1].get("county"), Some(&json!("8")));
        // no lookup entry for responder 3: column filled with null
        assert_eq!(joined.rows()[2].get("county"), Some(&json!(null)));
        // primary columns untouched
        assert_eq!(joined.rows()[2].get("value"), Some(&json!(30)));
    }

    #[test]
    fn test_left_join_fans_out_on_duplicate_keys() {
        let primary = table(json!([{"responder_id": 1}, {"responder_id": 2}]));
        let lookup = table(json!([
            {"responder_id": 1, "county": "7"},
            {"responder_id": 1, "county": "8"},
            {"responder_id": 2, "county": "9"}
        ]));

        let joined = left_join(
            &primary,
            &lookup,
            "responder_id",
            &keep(&["responder_id", "county"]),
        )
        .unwrap();

        assert_eq!(joined.len(), 3);
        assert_eq!(joined.rows()[0].get("county"), Some(&json!("7")));
        assert_eq!(joined.rows()[1].get("county"), Some(&json!("8")));
        assert_eq!(joined.rows()[2].get("county"), Some(&json!("9")));
    }

    #[test]
    fn test_left_join_projects_lookup_columns() {
        let primary = table(json!([{"responder_id": 1}]));
        let lookup = table(json!([
            {"responder_id": 1, "county": "7", "internal_note": "ignore me"}
        ]));

        let joined = left_join(
            &primary,
            &lookup,
            "responder_id",
            &keep(&["responder_id", "county"]),
        )
        .unwrap();

        assert!(joined.has_column("county"));
        assert!(!joined.has_column("internal_note"));
    }

    #[test]
    fn test_left_join_null_keys_match() {
        let primary = table(json!([{"responder_id": null}, {"other": 1}]));
        let lookup = table(json!([{"responder_id": null, "county": "7"}]));

        let joined = left_join(
            &primary,
            &lookup,
            "responder_id",
            &keep(&["responder_id", "county"]),
        )
        .unwrap();

        assert_eq!(joined.len(), 2);
        assert_eq!(joined.rows()[0].get("county"), Some(&json!("7")));
        // absent key joins as null too
        assert_eq!(joined.rows()[1].get("county"), Some(&json!("7")));
    }

    #[test]
    fn test_left_join_rejects_missing_join_column() {
        let primary = table(json!([{"responder_id": 1}]));
        let lookup = table(json!([{"county": "7"}]));

        let err = left_join(&primary, &lookup, "responder_id", &keep(&["responder_id"]))
            .unwrap_err();
        assert!(matches!(err, EnrichmentError::Configuration(_)));

        let lookup = table(json!([{"responder_id": 1, "county": "7"}]));
        let primary = table(json!([{"some_other_id": 1}]));
        let err = left_join(
            &primary,
            &lookup,
            "responder_id",
            &keep(&["responder_id", "county"]),
        )
        .unwrap_err();
        assert!(matches!(err, EnrichmentError::Configuration(_)));
    }

    #[test]
    fn test_left_join_rejects_missing_kept_column() {
        let primary = table(json!([{"responder_id": 1}]));
        let lookup = table(json!([{"responder_id": 1, "county": "7"}]));

        let err = left_join(
            &primary,
            &lookup,
            "responder_id",
            &keep(&["responder_id", "county", "region"]),
        )
        .unwrap_err();
        assert!(matches!(err, EnrichmentError::Configuration(_)));
    }

    #[test]
    fn test_left_join_rejects_keep_list_without_join_column() {
        let primary = table(json!([{"responder_id": 1}]));
        let lookup = table(json!([{"responder_id": 1, "county": "7"}]));

        let err = left_join(&primary, &lookup, "responder_id", &keep(&["county"])).unwrap_err();
        assert!(matches!(err, EnrichmentError::Configuration(_)));
    }

    #[test]
    fn test_left_join_rejects_colliding_lookup_column() {
        let primary = table(json!([{"responder_id": 1, "county": "already here"}]));
        let lookup = table(json!([{"responder_id": 1, "county": "7"}]));

        let err = left_join(
            &primary,
            &lookup,
            "responder_id",
            &keep(&["responder_id", "county"]),
        )
        .unwrap_err();
        assert!(matches!(err, EnrichmentError::Configuration(_)));
    }

    #[test]
    fn test_left_join_empty_primary() {
        let primary = Table::default();
        let lookup = table(json!([{"responder_id": 1, "county": "7"}]));

        let joined = left_join(
            &primary,
            &lookup,
            "responder_id",
            &keep(&["responder_id", "county"]),
        )
        .unwrap();
        assert!(joined.is_empty());
    }
}
