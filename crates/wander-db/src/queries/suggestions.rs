//! Database query functions for the `suggested_trips` table.

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::models::{NewSuggestion, SuggestedTrip};

/// List a user's cached suggestions in the order they were stored.
pub async fn list_suggestions_for_user(pool: &PgPool, user_id: &str) -> Result<Vec<SuggestedTrip>> {
    let suggestions = sqlx::query_as::<_, SuggestedTrip>(
        "SELECT * FROM suggested_trips WHERE user_id = $1 ORDER BY created_at ASC, id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .context("failed to list suggested trips")?;

    Ok(suggestions)
}

/// Replace a user's cached suggestions with `new`.
///
/// The delete and the inserts run in one transaction, so readers see
/// either the old set or the new one.
pub async fn replace_suggestions(
    pool: &PgPool,
    user_id: &str,
    new: &[NewSuggestion<'_>],
) -> Result<Vec<SuggestedTrip>> {
    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    sqlx::query("DELETE FROM suggested_trips WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .context("failed to clear suggested trips")?;

    let mut stored = Vec::with_capacity(new.len());
    for suggestion in new {
        let row = sqlx::query_as::<_, SuggestedTrip>(
            "INSERT INTO suggested_trips (user_id, name, description, trip_plan) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(suggestion.name)
        .bind(suggestion.description)
        .bind(suggestion.trip_plan)
        .fetch_one(&mut *tx)
        .await
        .with_context(|| format!("failed to insert suggestion {:?}", suggestion.name))?;
        stored.push(row);
    }

    tx.commit().await.context("failed to commit suggested trips")?;
    Ok(stored)
}

/// Drop a user's cached suggestions. Returns how many were removed.
pub async fn delete_suggestions_for_user(pool: &PgPool, user_id: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM suggested_trips WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .context("failed to delete suggested trips")?;

    Ok(result.rows_affected())
}
