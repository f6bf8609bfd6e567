//! `wander suggest`: destination ideas for the user.

use anyhow::Result;
use sqlx::PgPool;

use wander_core::service;
use wander_db::models::SuggestedTrip;

use crate::config::WanderConfig;

/// Print the cached suggestions, generating a new set when there are none
/// or `refresh` is set. The generator is only needed in the second case.
pub async fn run_suggest(pool: &PgPool, config: &WanderConfig, refresh: bool) -> Result<()> {
    let user_id = config.user_id()?;

    if !refresh {
        let cached = service::cached_suggestions(pool, user_id).await?;
        if !cached.is_empty() {
            print_suggestions(&cached);
            return Ok(());
        }
    }

    let generator = config.generator(None)?;
    println!("Generating suggestions with {}...", generator.name());
    let suggestions = service::suggest_trips(pool, user_id, generator.as_ref(), true).await?;
    print_suggestions(&suggestions);
    Ok(())
}

fn print_suggestions(suggestions: &[SuggestedTrip]) {
    for (i, suggestion) in suggestions.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}. {}", i + 1, suggestion.name);
        println!("   {}", suggestion.description);
    }
}
