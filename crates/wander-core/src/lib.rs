//! Trip planning logic: the wizard draft, stored-blob normalization,
//! current-trip resolution and itinerary generation.

pub mod blob;
pub mod dates;
pub mod draft;
pub mod generate;
pub mod lenient;
pub mod resolver;
pub mod service;
pub mod trip;
pub mod wizard;
