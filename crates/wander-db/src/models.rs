use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A saved trip row from the `trips` table.
///
/// `trip_data` and `trip_plan` are stored as they were written. Either may
/// be a JSON object or a JSON string holding the encoded object; callers
/// normalize before reading fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PersistedTrip {
    pub id: Uuid,
    pub user_id: String,
    pub trip_data: Value,
    pub trip_plan: Value,
    pub created_at: DateTime<Utc>,
}

impl PersistedTrip {
    /// Build an in-memory record that has not been stored. Used for
    /// previews and tests.
    pub fn unsaved(user_id: impl Into<String>, trip_data: Value, trip_plan: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            trip_data,
            trip_plan,
            created_at: Utc::now(),
        }
    }
}

/// A cached destination suggestion from the `suggested_trips` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SuggestedTrip {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub trip_plan: Value,
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a suggestion.
#[derive(Debug, Clone, Copy)]
pub struct NewSuggestion<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub trip_plan: &'a Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unsaved_keeps_blobs_verbatim() {
        let data = Value::String(r#"{"startDate":"2024-06-05"}"#.to_string());
        let plan = json!({"travelPlan": {"destination": "Lisbon"}});
        let trip = PersistedTrip::unsaved("user-1", data.clone(), plan.clone());
        assert_eq!(trip.user_id, "user-1");
        assert_eq!(trip.trip_data, data);
        assert_eq!(trip.trip_plan, plan);
    }
}
