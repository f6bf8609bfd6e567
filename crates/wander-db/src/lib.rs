//! PostgreSQL persistence for saved trips.

pub mod config;
pub mod models;
pub mod pool;
pub mod queries;
