//! Recursive removal of empty values from built documents
//!
//! Builders emit every optional field, leaving `null`, `""`, `[]` or `{}`
//! where the caller gave nothing. [`clean`] strips those bottom-up so they
//! never reach the rendered YAML. `false` and `0` are values, not absence,
//! and always survive.

use serde_json::{Map, Value};

/// Clean a value, returning `None` when nothing meaningful is left
pub fn clean(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) => {
            let cleaned: Vec<Value> = items.into_iter().filter_map(clean).collect();
            (!cleaned.is_empty()).then_some(Value::Array(cleaned))
        }
        Value::Object(entries) => {
            let cleaned: Map<String, Value> = entries
                .into_iter()
                .filter_map(|(key, value)| clean(value).map(|v| (key, v)))
                .collect();
            (!cleaned.is_empty()).then_some(Value::Object(cleaned))
        }
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_null_and_empty_string_are_dropped() {
        assert_eq!(clean(Value::Null), None);
        assert_eq!(clean(json!("")), None);
    }

    #[test]
    fn test_empty_object_collapses() {
        assert_eq!(clean(json!({})), None);
        assert_eq!(clean(json!({ "a": { "b": {} } })), None);
    }

    #[test]
    fn test_null_keys_are_removed() {
        assert_eq!(clean(json!({ "a": null, "b": 1 })), Some(json!({ "b": 1 })));
    }

    #[test]
    fn test_false_and_zero_survive() {
        assert_eq!(
            clean(json!([false, 0, "", null])),
            Some(json!([false, 0]))
        );
        assert_eq!(
            clean(json!({ "replicas": 0, "readOnly": false })),
            Some(json!({ "replicas": 0, "readOnly": false }))
        );
    }

    #[test]
    fn test_empty_arrays_collapse_after_cleaning() {
        assert_eq!(clean(json!({ "ports": [null, {}] })), None);
        assert_eq!(clean(json!({ "env": [], "name": "x" })), Some(json!({ "name": "x" })));
    }

    #[test]
    fn test_clean_is_idempotent() {
        let doc = json!({
            "metadata": { "name": "api", "labels": {}, "annotations": { "a": "" } },
            "spec": {
                "replicas": 0,
                "template": { "spec": { "containers": [{ "name": "api", "ports": [], "env": null }] } }
            }
        });
        let once = clean(doc).unwrap();
        let twice = clean(once.clone()).unwrap();
        assert_eq!(once, twice);
        assert_eq!(
            once,
            json!({
                "metadata": { "name": "api" },
                "spec": { "replicas": 0, "template": { "spec": { "containers": [{ "name": "api" }] } } }
            })
        );
    }

    #[test]
    fn test_key_order_is_preserved() {
        let cleaned = clean(json!({ "zeta": 1, "alpha": null, "mid": 2, "beta": 3 })).unwrap();
        let keys: Vec<_> = cleaned.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "mid", "beta"]);
    }
}
