//! Destination suggestions: a trip idea generated without a draft.

use crate::trip::TripPlan;

use super::prompt::PLAN_SCHEMA;

/// How many suggestions make up one set.
pub const SUGGESTION_COUNT: usize = 3;

/// Shown when a suggested plan carries no description.
pub const NO_DESCRIPTION: &str = "No description available";

/// Build the request for one suggestion, steering away from `exclude`.
pub fn build_recommendation_prompt(exclude: &[String]) -> String {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str("# Trip Recommendation Request\n\n");
    prompt.push_str(
        "You are a travel planner. Pick one destination worth visiting and \
         produce a short sample itinerary for it: 3 days, 2 travelers, \
         moderate budget, balanced activity level.\n\n",
    );
    if !exclude.is_empty() {
        prompt.push_str("Choose a destination other than: ");
        prompt.push_str(&exclude.join(", "));
        prompt.push_str(".\n\n");
    }
    prompt.push_str(PLAN_SCHEMA);

    prompt
}

/// One suggested destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub name: String,
    pub description: String,
    pub plan: TripPlan,
}

impl Suggestion {
    /// Name a suggestion after its plan's destination, described by the
    /// plan's summary.
    pub fn from_plan(plan: TripPlan) -> Self {
        Self {
            name: plan.destination().to_string(),
            description: plan.summary().unwrap_or(NO_DESCRIPTION).to_string(),
            plan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prompt_lists_destinations_to_avoid() {
        let prompt = build_recommendation_prompt(&["Kyoto".into(), "Porto".into()]);
        assert!(prompt.contains("other than: Kyoto, Porto."));
        assert!(prompt.contains("\"travelPlan\""));

        let first = build_recommendation_prompt(&[]);
        assert!(!first.contains("other than"));
    }

    #[test]
    fn suggestion_takes_name_and_description_from_plan() {
        let plan = TripPlan::from_blob(&json!({
            "travelPlan": {
                "destination": "Kyoto, Japan",
                "itinerary": [{"day": 1, "places": [{"placeName": "Gion", "placeDetails": "Old streets"}]}]
            }
        }));
        let suggestion = Suggestion::from_plan(plan);
        assert_eq!(suggestion.name, "Kyoto, Japan");
        assert_eq!(suggestion.description, "Old streets");

        let bare = Suggestion::from_plan(TripPlan::from_blob(&json!({"travelPlan": {"destination": "Oslo"}})));
        assert_eq!(bare.description, NO_DESCRIPTION);
    }
}
