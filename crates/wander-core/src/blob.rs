//! Normalization of stored trip blobs.
//!
//! A saved trip has two blobs, `trip_data` and `trip_plan`. Older writers
//! stored them as JSON text, newer ones as structured JSON, and readers
//! cannot tell in advance which they will get. [`normalize_blob`] turns
//! both encodings into the same structured value.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

/// Normalize a blob that may be JSON-encoded text or already structured.
///
/// - A string is decoded as JSON. If decoding fails the failure is logged
///   and an empty object is returned; this never errors.
/// - Any other value is returned unchanged.
///
/// For any non-string `x`, `normalize_blob(x) == x` and
/// `normalize_blob(Value::String(x.to_string())) == x`.
pub fn normalize_blob(value: Value) -> Value {
    match value {
        Value::String(text) => match serde_json::from_str::<Value>(&text) {
            Ok(decoded) => decoded,
            Err(err) => {
                warn!(error = %err, len = text.len(), "failed to decode stored trip blob");
                empty_blob()
            }
        },
        structured => structured,
    }
}

/// The empty structure substituted for undecodable blobs.
pub fn empty_blob() -> Value {
    Value::Object(Map::new())
}

/// Normalize a blob and deserialize it into `T`.
///
/// Shape mismatches are logged and yield `T::default()`, in keeping with
/// the fail-soft contract of [`normalize_blob`].
pub fn decode_blob<T>(value: &Value, what: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let normalized = normalize_blob(value.clone());
    match serde_json::from_value(normalized) {
        Ok(decoded) => decoded,
        Err(err) => {
            warn!(error = %err, blob = what, "stored trip blob has an unexpected shape");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_values_pass_through() {
        let plan = json!({"travelPlan": {"destination": "Kyoto"}});
        assert_eq!(normalize_blob(plan.clone()), plan);
        assert_eq!(normalize_blob(Value::Null), Value::Null);
        assert_eq!(normalize_blob(json!([1, 2])), json!([1, 2]));
    }

    #[test]
    fn json_text_is_decoded() {
        let plan = json!({"travelPlan": {"destination": "Kyoto", "itinerary": []}});
        let encoded = Value::String(plan.to_string());
        assert_eq!(normalize_blob(encoded), plan);
    }

    #[test]
    fn undecodable_text_becomes_empty_object() {
        assert_eq!(normalize_blob(json!("not json")), json!({}));
        assert_eq!(normalize_blob(json!("")), json!({}));
        assert_eq!(normalize_blob(json!("{\"unterminated\": ")), json!({}));
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        let samples = [
            json!({"a": 1}),
            Value::String(json!({"a": {"b": [1, 2, 3]}}).to_string()),
            json!("garbage"),
            json!(null),
        ];
        for sample in samples {
            let once = normalize_blob(sample);
            assert_eq!(normalize_blob(once.clone()), once);
        }
    }

    #[test]
    fn decode_blob_falls_back_to_default() {
        #[derive(Debug, Default, PartialEq, serde::Deserialize)]
        struct Shape {
            name: String,
        }

        let ok: Shape = decode_blob(&json!({"name": "x"}), "shape");
        assert_eq!(ok, Shape { name: "x".into() });

        let wrong: Shape = decode_blob(&json!([1, 2, 3]), "shape");
        assert_eq!(wrong, Shape::default());

        let text: Shape = decode_blob(&Value::String(r#"{"name":"y"}"#.into()), "shape");
        assert_eq!(text, Shape { name: "y".into() });
    }
}
