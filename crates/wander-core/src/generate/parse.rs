//! Validation of a generator's response.
//!
//! Unlike stored blobs, a fresh response is checked strictly: output that
//! is not JSON, or has no destination, is reported instead of being
//! replaced by an empty plan. Individual fields are still read leniently.

use thiserror::Error;

use crate::trip::TripPlan;

/// Errors from reading a generated plan.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generator returned no output")]
    EmptyOutput,

    #[error("generated plan is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("generated plan has no destination")]
    MissingDestination,
}

/// Drop a surrounding Markdown code fence (```` ``` ```` or ```` ```json ````).
fn strip_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string on the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parse and check a generator's raw output.
pub fn parse_generated_plan(text: &str) -> Result<TripPlan, GenerateError> {
    let body = strip_fence(text);
    if body.is_empty() {
        return Err(GenerateError::EmptyOutput);
    }

    let plan: TripPlan = serde_json::from_str(body)?;
    let has_destination = plan
        .travel_plan
        .destination
        .as_deref()
        .is_some_and(|d| !d.trim().is_empty());
    if !has_destination {
        return Err(GenerateError::MissingDestination);
    }
    Ok(plan)
}
