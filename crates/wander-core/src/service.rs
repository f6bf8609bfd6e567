//! Trip service layer.
//!
//! Ties the draft, the generator and the `trips` and `suggested_trips`
//! tables together. New rows always store blobs as JSON objects; loaded
//! rows are normalized so older string-encoded rows read the same way.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use wander_db::models::{NewSuggestion, SuggestedTrip};
use wander_db::queries::suggestions as suggestion_db;
use wander_db::queries::trips as db;

use crate::draft::TripDraft;
use crate::generate::{
    ItineraryGenerator, SUGGESTION_COUNT, Suggestion, build_generation_prompt,
    build_recommendation_prompt, parse_generated_plan,
};
use crate::resolver::{self, CurrentTrip};
use crate::trip::{SavedTrip, TripData, TripPlan};

/// Ask `generator` for a plan for `data` and validate the answer.
pub async fn generate_plan(data: &TripData, generator: &dyn ItineraryGenerator) -> Result<TripPlan> {
    let prompt = build_generation_prompt(data);
    let raw = generator
        .generate(&prompt)
        .await
        .with_context(|| format!("generator '{}' failed", generator.name()))?;
    let plan = parse_generated_plan(&raw)
        .with_context(|| format!("generator '{}' returned an unusable plan", generator.name()))?;
    Ok(plan)
}

/// Submit a completed draft: generate its itinerary and store the trip.
///
/// Nothing is written if the draft is incomplete or generation fails.
pub async fn submit_trip(
    pool: &PgPool,
    user_id: &str,
    draft: &TripDraft,
    generator: &dyn ItineraryGenerator,
) -> Result<SavedTrip> {
    let data = draft.to_trip_data().context("trip draft is not ready")?;
    let plan = generate_plan(&data, generator).await?;

    let record = db::insert_trip(pool, user_id, &data.to_value(), &plan.to_value())
        .await
        .context("failed to save trip")?;

    info!(
        trip_id = %record.id,
        user_id,
        destination = data.destination_name(),
        "trip created"
    );
    Ok(SavedTrip::from_record(record))
}

/// All of a user's trips, oldest first, with blobs normalized.
pub async fn load_user_trips(pool: &PgPool, user_id: &str) -> Result<Vec<SavedTrip>> {
    let records = db::list_trips_for_user(pool, user_id)
        .await
        .with_context(|| format!("failed to load trips for user {user_id}"))?;
    Ok(records.into_iter().map(SavedTrip::from_record).collect())
}

/// One trip, if it exists and belongs to the user.
pub async fn load_trip(pool: &PgPool, user_id: &str, id: Uuid) -> Result<Option<SavedTrip>> {
    let record = db::get_trip(pool, user_id, id)
        .await
        .with_context(|| format!("failed to load trip {id}"))?;
    Ok(record.map(SavedTrip::from_record))
}

/// The user's trip in progress on `today`, if any.
pub async fn find_current_trip(
    pool: &PgPool,
    user_id: &str,
    today: NaiveDate,
) -> Result<Option<CurrentTrip>> {
    let records = db::list_trips_for_user(pool, user_id)
        .await
        .with_context(|| format!("failed to load trips for user {user_id}"))?;
    Ok(resolver::find_current_trip(&records, today))
}

/// Replace a stored trip's itinerary with a freshly generated one.
pub async fn regenerate_plan(
    pool: &PgPool,
    user_id: &str,
    id: Uuid,
    generator: &dyn ItineraryGenerator,
) -> Result<SavedTrip> {
    let mut trip = load_trip(pool, user_id, id)
        .await?
        .with_context(|| format!("trip {id} not found"))?;

    let plan = generate_plan(&trip.data, generator).await?;
    let value = plan.to_value();
    db::update_trip_plan(pool, user_id, id, &value)
        .await
        .context("failed to save regenerated plan")?;

    info!(trip_id = %id, user_id, "trip plan regenerated");
    trip.record.trip_plan = value;
    trip.plan = plan;
    Ok(trip)
}

/// Ask `generator` for up to `count` distinct destination suggestions.
///
/// A failed or duplicate answer is logged and skipped. Fails only when no
/// suggestion could be produced at all.
pub async fn generate_suggestions(
    generator: &dyn ItineraryGenerator,
    count: usize,
) -> Result<Vec<Suggestion>> {
    let mut suggestions: Vec<Suggestion> = Vec::with_capacity(count);
    let mut last_error = None;

    for attempt in 1..=count {
        let exclude: Vec<String> = suggestions.iter().map(|s| s.name.clone()).collect();
        let prompt = build_recommendation_prompt(&exclude);
        let result = match generator.generate(&prompt).await {
            Ok(raw) => parse_generated_plan(&raw).map_err(anyhow::Error::from),
            Err(err) => Err(err),
        };
        match result {
            Ok(plan) => {
                let suggestion = Suggestion::from_plan(plan);
                if exclude.contains(&suggestion.name) {
                    warn!(attempt, name = %suggestion.name, "generator repeated a suggestion");
                    continue;
                }
                suggestions.push(suggestion);
            }
            Err(err) => {
                warn!(attempt, error = %err, "suggestion generation failed");
                last_error = Some(err);
            }
        }
    }

    if suggestions.is_empty() {
        let err = last_error
            .unwrap_or_else(|| anyhow::anyhow!("generator repeated the same destination"));
        return Err(err.context(format!("generator '{}' produced no suggestions", generator.name())));
    }
    Ok(suggestions)
}

/// The user's stored suggestion set, possibly empty.
pub async fn cached_suggestions(pool: &PgPool, user_id: &str) -> Result<Vec<SuggestedTrip>> {
    suggestion_db::list_suggestions_for_user(pool, user_id)
        .await
        .with_context(|| format!("failed to load suggestions for user {user_id}"))
}

/// A user's destination suggestions.
///
/// The cached set is returned when there is one and `refresh` is false.
/// Otherwise a new set is generated and replaces the cache; if generation
/// fails the old set is left in place.
pub async fn suggest_trips(
    pool: &PgPool,
    user_id: &str,
    generator: &dyn ItineraryGenerator,
    refresh: bool,
) -> Result<Vec<SuggestedTrip>> {
    if !refresh {
        let cached = cached_suggestions(pool, user_id).await?;
        if !cached.is_empty() {
            info!(user_id, count = cached.len(), "using cached suggestions");
            return Ok(cached);
        }
    }

    let suggestions = generate_suggestions(generator, SUGGESTION_COUNT).await?;
    let plans: Vec<_> = suggestions.iter().map(|s| s.plan.to_value()).collect();
    let new: Vec<NewSuggestion<'_>> = suggestions
        .iter()
        .zip(&plans)
        .map(|(s, plan)| NewSuggestion {
            name: &s.name,
            description: &s.description,
            trip_plan: plan,
        })
        .collect();

    let stored = suggestion_db::replace_suggestions(pool, user_id, &new)
        .await
        .context("failed to save suggestions")?;
    info!(user_id, count = stored.len(), "suggestions generated");
    Ok(stored)
}
