//! Prompt construction for itinerary generation. Pure logic, no I/O.

use crate::dates::{TripLength, format_day};
use crate::trip::{NOT_SPECIFIED, TripData};

/// JSON shape the generator must answer with.
pub(crate) const PLAN_SCHEMA: &str = r#"## Response format

Reply with a single JSON object and nothing else:

```json
{
  "travelPlan": {
    "destination": "string",
    "destinationDescription": "string",
    "budget": "string",
    "flight": {
      "airlineName": "string",
      "airlineUrl": "string",
      "flightPrice": "number or string"
    },
    "hotels": [
      {
        "hotelName": "string",
        "rating": 4.5,
        "price": "number or string",
        "geoCoordinates": { "latitude": 0.0, "longitude": 0.0 },
        "description": "string",
        "bookingUrl": "string"
      }
    ],
    "itinerary": [
      {
        "day": 1,
        "places": [
          {
            "placeName": "string",
            "placeDetails": "string",
            "ticketPricing": "number or string",
            "timeToTravel": "string",
            "geoCoordinates": { "latitude": 0.0, "longitude": 0.0 }
          }
        ]
      }
    ]
  }
}
```
"#;

const GUIDELINES: &str = r#"## Guidelines

1. Plan exactly one itinerary entry per day of the trip.
2. Keep hotel and ticket prices within the stated budget.
3. Match the number of places per day to the activity level.
4. Order each day's places so travel time between them stays short.
"#;

/// Build the generation request for a submitted trip.
pub fn build_generation_prompt(data: &TripData) -> String {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str("# Travel Plan Request\n\n");
    prompt.push_str(
        "You are a travel planner. Produce a day-by-day itinerary with flight \
         and hotel suggestions for the trip below.\n\n",
    );

    prompt.push_str("## Trip\n\n");
    prompt.push_str(&format!("- **Destination:** {}\n", data.destination_name()));
    if let Some(coords) = data.location_info.as_ref().and_then(|l| l.coordinates) {
        prompt.push_str(&format!(
            "- **Coordinates:** {:.4}, {:.4}\n",
            coords.lat, coords.lng
        ));
    }
    match data.date_range() {
        Some((start, end)) => {
            let len = TripLength::between(start, end);
            prompt.push_str(&format!(
                "- **Dates:** {} to {} ({} days, {} nights)\n",
                format_day(start),
                format_day(end),
                len.days,
                len.nights
            ));
        }
        None => prompt.push_str("- **Dates:** flexible\n"),
    }
    prompt.push_str(&format!("- **Travelers:** {}\n", data.travelers_label()));
    prompt.push_str(&format!(
        "- **Budget:** {}\n",
        data.budget.as_deref().unwrap_or(NOT_SPECIFIED)
    ));
    prompt.push_str(&format!(
        "- **Activity level:** {}\n\n",
        data.activity_level.as_deref().unwrap_or(NOT_SPECIFIED)
    ));

    prompt.push_str(GUIDELINES);
    prompt.push('\n');
    prompt.push_str(PLAN_SCHEMA);

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lisbon() -> TripData {
        TripData::from_blob(&json!({
            "locationInfo": {"name": "Lisbon, Portugal", "coordinates": {"lat": 38.7223, "lng": -9.1393}},
            "startDate": "2024-06-05",
            "endDate": "2024-06-15",
            "whoIsGoing": "Couple",
            "budget": "Moderate",
            "activityLevel": "Balanced"
        }))
    }

    #[test]
    fn prompt_describes_the_trip() {
        let prompt = build_generation_prompt(&lisbon());
        assert!(prompt.contains("**Destination:** Lisbon, Portugal"));
        assert!(prompt.contains("**Coordinates:** 38.7223, -9.1393"));
        assert!(prompt.contains("2024-06-05 to 2024-06-15 (11 days, 10 nights)"));
        assert!(prompt.contains("**Travelers:** Couple"));
        assert!(prompt.contains("**Budget:** Moderate"));
        assert!(prompt.contains("**Activity level:** Balanced"));
    }

    #[test]
    fn prompt_contains_response_schema() {
        let prompt = build_generation_prompt(&lisbon());
        assert!(prompt.contains("\"travelPlan\""));
        assert!(prompt.contains("\"itinerary\""));
        assert!(prompt.contains("\"geoCoordinates\""));
    }

    #[test]
    fn missing_values_use_fallbacks() {
        let prompt = build_generation_prompt(&TripData::default());
        assert!(prompt.contains("**Destination:** Unknown Location"));
        assert!(prompt.contains("**Dates:** flexible"));
        assert!(prompt.contains("**Budget:** Not specified"));
        assert!(!prompt.contains("**Coordinates:**"));
    }
}
