//! Typed views of the two blobs stored with every trip.
//!
//! The JSON field names (`locationInfo`, `whoIsGoing`, `travelPlan`, ...)
//! are the stored format and are shared with existing documents, so the
//! types rename to camelCase. Every field is optional on read, and a field
//! of the wrong shape is dropped on its own rather than failing the record.

pub mod plan;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use wander_db::models::PersistedTrip;

use crate::blob::{decode_blob, normalize_blob};
use crate::dates::TripLength;
use crate::lenient;

pub use plan::{Flight, GeoCoordinates, Hotel, ItineraryDay, Place, Scalar, TravelPlan, TripPlan};

/// Fallback shown for a trip without a destination name.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";
/// Fallback shown for unset preferences.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Latitude/longitude as returned by the places search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// The chosen destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    #[serde(default, deserialize_with = "lenient::name")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub coordinates: Option<Coordinates>,
    /// Photo reference for the places photo endpoint.
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_ref: Option<String>,
    /// External maps URL for the place.
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
}

/// The `trip_data` blob: a submitted draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripData {
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub location_info: Option<LocationInfo>,
    #[serde(
        default,
        with = "crate::dates::serde_day",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(
        default,
        with = "crate::dates::serde_day",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_no_of_days: Option<i64>,
    /// Usually a category name (`"Couple"`). Some old documents hold a
    /// list of `{"type": ...}` objects instead, so this stays loosely typed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub who_is_going: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub budget: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub activity_level: Option<String>,
}

impl TripData {
    /// Decode a stored blob (text or structured). Never fails.
    pub fn from_blob(blob: &Value) -> Self {
        decode_blob(blob, "trip_data")
    }

    /// Structured form written to storage.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| crate::blob::empty_blob())
    }

    /// Both dates, if both parsed.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start_date?, self.end_date?))
    }

    /// Inclusive day count: the stored value, or one derived from the dates.
    pub fn total_days(&self) -> Option<i64> {
        self.total_no_of_days.or_else(|| {
            self.date_range()
                .map(|(start, end)| TripLength::between(start, end).days)
        })
    }

    pub fn destination_name(&self) -> &str {
        self.location_info
            .as_ref()
            .map(|l| l.name.as_str())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN_LOCATION)
    }

    /// Traveler label for display: the category name, or the joined
    /// `type` entries of a list.
    pub fn travelers_label(&self) -> String {
        match &self.who_is_going {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Array(items)) => {
                let types: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("type").and_then(Value::as_str))
                    .collect();
                if types.is_empty() {
                    NOT_SPECIFIED.to_string()
                } else {
                    types.join(", ")
                }
            }
            _ => NOT_SPECIFIED.to_string(),
        }
    }
}

/// A stored trip with both blobs normalized and decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedTrip {
    /// The row, with `trip_data` and `trip_plan` in structured form.
    pub record: PersistedTrip,
    pub data: TripData,
    pub plan: TripPlan,
}

impl SavedTrip {
    pub fn from_record(mut record: PersistedTrip) -> Self {
        record.trip_data = normalize_blob(record.trip_data);
        record.trip_plan = normalize_blob(record.trip_plan);
        let data = TripData::from_blob(&record.trip_data);
        let plan = TripPlan::from_blob(&record.trip_plan);
        Self { record, data, plan }
    }

    /// Display name: the submitted destination, else the plan's.
    pub fn title(&self) -> &str {
        match self.data.destination_name() {
            UNKNOWN_LOCATION => self.plan.destination(),
            name => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn decodes_stored_document() {
        let blob = json!({
            "locationInfo": {
                "name": "Lisbon, Portugal",
                "coordinates": {"lat": 38.72, "lng": -9.14},
                "photoRef": "abc",
                "url": "https://maps.example/lisbon"
            },
            "startDate": "2024-06-05T00:00:00.000Z",
            "endDate": "2024-06-15",
            "totalNoOfDays": 11,
            "whoIsGoing": "Couple",
            "budget": "Moderate",
            "activityLevel": "Balanced"
        });
        let data = TripData::from_blob(&blob);
        assert_eq!(data.destination_name(), "Lisbon, Portugal");
        assert_eq!(data.date_range(), Some((day(2024, 6, 5), day(2024, 6, 15))));
        assert_eq!(data.total_days(), Some(11));
        assert_eq!(data.travelers_label(), "Couple");
        assert_eq!(
            data.location_info.unwrap().coordinates,
            Some(Coordinates { lat: 38.72, lng: -9.14 })
        );
    }

    #[test]
    fn text_and_structured_blobs_decode_alike() {
        let blob = json!({"startDate": "2024-06-05", "endDate": "2024-06-07"});
        let text = Value::String(blob.to_string());
        assert_eq!(TripData::from_blob(&blob), TripData::from_blob(&text));
    }

    #[test]
    fn unreadable_dates_become_none() {
        let data = TripData::from_blob(&json!({"startDate": "soon", "endDate": 42.5}));
        assert_eq!(data.start_date, None);
        assert_eq!(data.end_date, None);
        assert_eq!(data.total_days(), None);
    }

    #[test]
    fn total_days_derived_when_not_stored() {
        let data = TripData::from_blob(&json!({"startDate": "2024-06-05", "endDate": "2024-06-15"}));
        assert_eq!(data.total_days(), Some(11));
    }

    #[test]
    fn traveler_list_is_joined() {
        let data = TripData::from_blob(&json!({
            "whoIsGoing": [{"type": "Adult"}, {"type": "Child"}]
        }));
        assert_eq!(data.travelers_label(), "Adult, Child");
        assert_eq!(TripData::default().travelers_label(), NOT_SPECIFIED);
    }

    #[test]
    fn missing_destination_uses_fallback() {
        assert_eq!(TripData::default().destination_name(), UNKNOWN_LOCATION);
    }

    #[test]
    fn bad_fields_are_dropped_one_at_a_time() {
        let data = TripData::from_blob(&json!({
            "locationInfo": {"name": null, "coordinates": {"lat": "north"}},
            "startDate": "2024-06-05",
            "endDate": "2024-06-15",
            "totalNoOfDays": "11",
            "budget": {"title": "Moderate"},
            "activityLevel": "Balanced"
        }));
        assert_eq!(data.date_range(), Some((day(2024, 6, 5), day(2024, 6, 15))));
        assert_eq!(data.destination_name(), UNKNOWN_LOCATION);
        assert_eq!(data.location_info.as_ref().unwrap().coordinates, None);
        assert_eq!(data.total_no_of_days, None);
        assert_eq!(data.total_days(), Some(11));
        assert_eq!(data.budget, None);
        assert_eq!(data.activity_level.as_deref(), Some("Balanced"));
    }

    #[test]
    fn saved_trip_normalizes_text_blobs() {
        let data = json!({"locationInfo": {"name": "Porto"}, "startDate": "2024-06-05"});
        let record = PersistedTrip::unsaved(
            "user-1",
            Value::String(data.to_string()),
            json!({"travelPlan": {"destination": "Porto, Portugal"}}),
        );
        let trip = SavedTrip::from_record(record);
        assert_eq!(trip.record.trip_data, data);
        assert_eq!(trip.title(), "Porto");
        assert_eq!(trip.plan.destination(), "Porto, Portugal");
    }

    #[test]
    fn title_falls_back_to_plan_destination() {
        let record = PersistedTrip::unsaved(
            "user-1",
            Value::String("{broken".into()),
            json!({"travelPlan": {"destination": "Seville"}}),
        );
        let trip = SavedTrip::from_record(record);
        assert_eq!(trip.record.trip_data, json!({}));
        assert_eq!(trip.title(), "Seville");
    }

    #[test]
    fn to_value_writes_plain_dates() {
        let data = TripData {
            start_date: Some(day(2024, 6, 5)),
            end_date: Some(day(2024, 6, 15)),
            ..TripData::default()
        };
        assert_eq!(
            data.to_value(),
            json!({"startDate": "2024-06-05", "endDate": "2024-06-15"})
        );
        assert_eq!(TripData::from_blob(&data.to_value()), data);
    }
}
