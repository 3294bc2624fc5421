//! Core library for the `walkability` CLI.
//!
//! This crate defines:
//! - Weather observations built from raw provider records
//! - User preference normalization
//! - The walkability scoring model and its verdicts
//! - The weather provider abstraction and its OpenWeather implementation
//! - Configuration & credentials handling
//!
//! It is used by `walkability-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod preference;
pub mod provider;
pub mod score;

pub use config::Config;
pub use error::WalkError;
pub use model::WeatherObservation;
pub use preference::PreferenceVector;
pub use provider::{WeatherProvider, fetch_observation, provider_from_config};
pub use score::{ScoreBreakdown, Verdict, breakdown, score};
