//! The `trip_plan` blob: a generated itinerary.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::{NOT_SPECIFIED, UNKNOWN_LOCATION};
use crate::blob::decode_blob;
use crate::lenient;

/// A number or free text. Generated plans are inconsistent about prices
/// (`120` vs `"$120 per night"`) and day labels (`1` vs `"Day 1"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(Number),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(default, deserialize_with = "lenient::name")]
    pub airline_name: String,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub airline_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub flight_price: Option<Scalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    #[serde(default, deserialize_with = "lenient::name")]
    pub hotel_name: String,
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<Scalar>,
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Scalar>,
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub geo_coordinates: Option<GeoCoordinates>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub booking_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_ref: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(default, deserialize_with = "lenient::name")]
    pub place_name: String,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub place_details: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub ticket_pricing: Option<Scalar>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_to_travel: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub geo_coordinates: Option<GeoCoordinates>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_ref: Option<String>,
}

/// One day of the itinerary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub day: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub places: Vec<Place>,
    /// Where to stay that night, when the plan varies it by day.
    #[serde(
        default,
        deserialize_with = "lenient::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub hotels: Vec<Hotel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlan {
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub destination: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub destination_description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub budget: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub flight: Option<Flight>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub hotels: Vec<Hotel>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub itinerary: Vec<ItineraryDay>,
}

/// Top-level plan document: `{"travelPlan": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub travel_plan: TravelPlan,
}

impl TripPlan {
    /// Decode a stored blob (text or structured). Never fails.
    pub fn from_blob(blob: &Value) -> Self {
        decode_blob(blob, "trip_plan")
    }

    /// Structured form written to storage.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| crate::blob::empty_blob())
    }

    pub fn destination(&self) -> &str {
        self.travel_plan
            .destination
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(UNKNOWN_LOCATION)
    }

    pub fn budget(&self) -> &str {
        self.travel_plan
            .budget
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or(NOT_SPECIFIED)
    }

    /// One-line description: the destination blurb, else the first
    /// place's details.
    pub fn summary(&self) -> Option<&str> {
        self.travel_plan
            .destination_description
            .as_deref()
            .filter(|d| !d.is_empty())
            .or_else(|| {
                self.travel_plan
                    .itinerary
                    .first()
                    .and_then(|day| day.places.first())
                    .and_then(|place| place.place_details.as_deref())
            })
    }

    /// Every hotel in the plan: plan-level first, then per-day ones not
    /// already listed.
    pub fn all_hotels(&self) -> Vec<&Hotel> {
        let mut hotels: Vec<&Hotel> = self.travel_plan.hotels.iter().collect();
        for day in &self.travel_plan.itinerary {
            for hotel in &day.hotels {
                if !hotels.iter().any(|h| h.hotel_name == hotel.hotel_name) {
                    hotels.push(hotel);
                }
            }
        }
        hotels
    }

    pub fn is_empty(&self) -> bool {
        self.travel_plan == TravelPlan::default()
    }
}
