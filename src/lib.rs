//! Personalization and recommendation engine for a shopping product feed.
//!
//! Detects the time-of-day moment, turns onboarding answers into a user profile,
//! asks a pluggable provider for picks and a greeting, and drives the swipeable
//! feed that displays them.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
