//! Database query functions for the `trips` table.
//!
//! Every query is scoped by `user_id`: a trip id alone never reaches
//! another user's row.

use anyhow::{Context, Result};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::PersistedTrip;

/// Insert a trip. Returns the stored row with its server-generated id and
/// timestamp.
pub async fn insert_trip(
    pool: &PgPool,
    user_id: &str,
    trip_data: &Value,
    trip_plan: &Value,
) -> Result<PersistedTrip> {
    let trip = sqlx::query_as::<_, PersistedTrip>(
        "INSERT INTO trips (user_id, trip_data, trip_plan) \
         VALUES ($1, $2, $3) \
         RETURNING *",
    )
    .bind(user_id)
    .bind(trip_data)
    .bind(trip_plan)
    .fetch_one(pool)
    .await
    .context("failed to insert trip")?;

    Ok(trip)
}

/// Fetch one of a user's trips by id.
pub async fn get_trip(pool: &PgPool, user_id: &str, id: Uuid) -> Result<Option<PersistedTrip>> {
    let trip = sqlx::query_as::<_, PersistedTrip>(
        "SELECT * FROM trips WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .context("failed to fetch trip")?;

    Ok(trip)
}

/// List a user's trips, oldest first.
pub async fn list_trips_for_user(pool: &PgPool, user_id: &str) -> Result<Vec<PersistedTrip>> {
    let trips = sqlx::query_as::<_, PersistedTrip>(
        "SELECT * FROM trips WHERE user_id = $1 ORDER BY created_at ASC, id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .context("failed to list trips")?;

    Ok(trips)
}

/// Delete one of a user's trips. Returns `false` if there was no such trip.
pub async fn delete_trip(pool: &PgPool, user_id: &str, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM trips WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await
        .context("failed to delete trip")?;

    Ok(result.rows_affected() > 0)
}

/// Replace a trip's plan blob, e.g. after regenerating the itinerary.
pub async fn update_trip_plan(
    pool: &PgPool,
    user_id: &str,
    id: Uuid,
    trip_plan: &Value,
) -> Result<()> {
    let result = sqlx::query("UPDATE trips SET trip_plan = $1 WHERE id = $2 AND user_id = $3")
        .bind(trip_plan)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await
        .context("failed to update trip plan")?;

    if result.rows_affected() == 0 {
        anyhow::bail!("trip {id} not found");
    }

    Ok(())
}
