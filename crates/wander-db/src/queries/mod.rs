pub mod trips;
pub mod suggestions;
