//! Itinerary generation: prompts, generator backends and response checks.

pub mod generator;
pub mod parse;
pub mod prompt;
pub mod recommend;

pub use generator::{CommandGenerator, ItineraryGenerator, StaticGenerator};
pub use parse::{GenerateError, parse_generated_plan};
pub use prompt::build_generation_prompt;
pub use recommend::{
    NO_DESCRIPTION, SUGGESTION_COUNT, Suggestion, build_recommendation_prompt,
};
