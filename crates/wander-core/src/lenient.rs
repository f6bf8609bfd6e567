//! Field-level fail-soft deserializers for trip blobs.
//!
//! Stored and generated blobs come from loosely-typed writers. Each adapter
//! here reads the raw JSON for one field and maps a value of the wrong shape
//! to `None`, an empty string, or (for lists) drops the offending item, so a
//! bad field never takes the rest of the record down with it.
//!
//! Use with `#[serde(default, deserialize_with = "...")]`.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

fn decode<T: DeserializeOwned>(value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            debug!(error = %err, "ignoring trip field with unexpected shape");
            None
        }
    }
}

/// Any `T`, or `None` when the value is null or does not decode.
pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(decode))
}

/// Any `T`, or `T::default()` when the value is null or does not decode.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(option(deserializer)?.unwrap_or_default())
}

/// Free text. Numbers and booleans are kept as their JSON text.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// A required name: like [`text`], empty when missing or unreadable.
pub fn name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.unwrap_or_default())
}

/// A list whose unreadable items are skipped. Anything but an array is
/// read as an empty list.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Array(items)) => items.into_iter().filter_map(decode).collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Item {
        id: u32,
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "super::name")]
        name: String,
        #[serde(default, deserialize_with = "super::text")]
        note: Option<String>,
        #[serde(default, deserialize_with = "super::option")]
        count: Option<i64>,
        #[serde(default, deserialize_with = "super::list")]
        items: Vec<Item>,
    }

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn well_formed_fields_decode() {
        let r = record(json!({"name": "a", "note": "n", "count": 3, "items": [{"id": 1}]}));
        assert_eq!(
            r,
            Record {
                name: "a".into(),
                note: Some("n".into()),
                count: Some(3),
                items: vec![Item { id: 1 }],
            }
        );
    }

    #[test]
    fn bad_fields_fall_back_individually() {
        let r = record(json!({
            "name": null,
            "note": {"title": "x"},
            "count": "11",
            "items": [{"id": 1}, {"id": "two"}, 7, {"id": 3}]
        }));
        assert_eq!(r.name, "");
        assert_eq!(r.note, None);
        assert_eq!(r.count, None);
        assert_eq!(r.items, vec![Item { id: 1 }, Item { id: 3 }]);
    }

    #[test]
    fn scalars_are_kept_as_text() {
        let r = record(json!({"name": 42, "note": true, "items": "none"}));
        assert_eq!(r.name, "42");
        assert_eq!(r.note.as_deref(), Some("true"));
        assert!(r.items.is_empty());
    }
}
