//! Update-Payload Compilation
//!
//! Merge payloads are JSON objects mapping top-level field names to values.
//! A value is normally assigned as-is; the [`array_union`] and
//! [`array_remove`] helpers produce sentinel objects that compile to the
//! engine's native array functions instead, so field-level array mutations
//! ride inside an ordinary update payload.

use crate::db::error::DataError;
use serde_json::{Map, Value};

/// Sentinel key marking an append-distinct array mutation
const ARRAY_UNION: &str = "$arrayUnion";
/// Sentinel key marking a remove-matching array mutation
const ARRAY_REMOVE: &str = "$arrayRemove";

/// Append-distinct sentinel: each value is added unless already present
///
/// Usable as a field value inside `update_document` / batch merge payloads.
pub fn array_union(values: impl IntoIterator<Item = Value>) -> Value {
    sentinel_object(ARRAY_UNION, values)
}

/// Remove-matching sentinel: every matching element is removed
pub fn array_remove(values: impl IntoIterator<Item = Value>) -> Value {
    sentinel_object(ARRAY_REMOVE, values)
}

fn sentinel_object(key: &str, values: impl IntoIterator<Item = Value>) -> Value {
    let mut object = Map::new();
    object.insert(key.to_string(), Value::Array(values.into_iter().collect()));
    Value::Object(object)
}

/// A compiled `SET` clause with its numbered bindings
pub(crate) struct SetClause {
    /// Comma-joined assignments; empty when the payload had no fields
    pub assignments: String,
    /// Bind-name to value pairs backing the assignments
    pub bindings: Vec<(String, Value)>,
}

/// Compile a merge payload into a `SET` clause
///
/// `prefix` namespaces the bind parameters so several compiled clauses can
/// share one statement (batch updates).
pub(crate) fn compile_set(payload: &Value, prefix: &str) -> Result<SetClause, DataError> {
    let object = payload.as_object().ok_or(DataError::PayloadNotObject)?;

    let mut assignments = Vec::with_capacity(object.len());
    let mut bindings = Vec::with_capacity(object.len());
    for (index, (field, value)) in object.iter().enumerate() {
        validate_field(field)?;
        let bind = format!("{prefix}{index}");
        match sentinel(value) {
            Some(Sentinel::Union(items)) => {
                assignments.push(format!("{field} = array::union({field} ?? [], ${bind})"));
                bindings.push((bind, Value::Array(items.clone())));
            }
            Some(Sentinel::Remove(items)) => {
                assignments.push(format!(
                    "{field} = array::complement({field} ?? [], ${bind})"
                ));
                bindings.push((bind, Value::Array(items.clone())));
            }
            None => {
                assignments.push(format!("{field} = ${bind}"));
                bindings.push((bind, value.clone()));
            }
        }
    }

    Ok(SetClause {
        assignments: assignments.join(", "),
        bindings,
    })
}

/// Field names are spliced into statements, so restrict them to identifiers
pub(crate) fn validate_field(field: &str) -> Result<(), DataError> {
    let valid = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DataError::invalid_field(field))
    }
}

enum Sentinel<'a> {
    Union(&'a Vec<Value>),
    Remove(&'a Vec<Value>),
}

fn sentinel(value: &Value) -> Option<Sentinel<'_>> {
    let object = value.as_object()?;
    if object.len() != 1 {
        return None;
    }
    let (key, inner) = object.iter().next()?;
    let items = inner.as_array()?;
    match key.as_str() {
        ARRAY_UNION => Some(Sentinel::Union(items)),
        ARRAY_REMOVE => Some(Sentinel::Remove(items)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_fields_compile_to_numbered_assignments() {
        let clause = compile_set(&json!({"name": "alice", "points": 3}), "f").unwrap();
        assert_eq!(clause.assignments, "name = $f0, points = $f1");
        assert_eq!(
            clause.bindings,
            vec![
                ("f0".to_string(), json!("alice")),
                ("f1".to_string(), json!(3)),
            ]
        );
    }

    #[test]
    fn array_sentinels_compile_to_native_functions() {
        let payload = json!({
            "tags": array_union([json!("a"), json!("b")]),
            "flags": array_remove([json!("stale")]),
        });
        // serde_json::Map iterates fields in key order: flags before tags
        let clause = compile_set(&payload, "f").unwrap();
        assert_eq!(
            clause.assignments,
            "flags = array::complement(flags ?? [], $f0), tags = array::union(tags ?? [], $f1)"
        );
        assert_eq!(clause.bindings[0].1, json!(["stale"]));
        assert_eq!(clause.bindings[1].1, json!(["a", "b"]));
    }

    #[test]
    fn ordinary_single_key_objects_are_not_sentinels() {
        let clause = compile_set(&json!({"nested": {"inner": 1}}), "f").unwrap();
        assert_eq!(clause.assignments, "nested = $f0");
        assert_eq!(clause.bindings[0].1, json!({"inner": 1}));
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        assert!(matches!(
            compile_set(&json!([1, 2, 3]), "f"),
            Err(DataError::PayloadNotObject)
        ));
        assert!(matches!(
            compile_set(&json!("scalar"), "f"),
            Err(DataError::PayloadNotObject)
        ));
    }

    #[test]
    fn field_names_outside_the_identifier_set_are_rejected() {
        assert!(matches!(
            compile_set(&json!({"na me": 1}), "f"),
            Err(DataError::InvalidField { .. })
        ));
        assert!(validate_field("ok_name_9").is_ok());
        assert!(validate_field("").is_err());
        assert!(validate_field("a;DROP").is_err());
    }

    #[test]
    fn empty_payload_compiles_to_an_empty_clause() {
        let clause = compile_set(&json!({}), "f").unwrap();
        assert!(clause.assignments.is_empty());
        assert!(clause.bindings.is_empty());
    }
}
