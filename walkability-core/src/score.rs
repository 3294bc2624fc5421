//! Walkability scoring.
//!
//! The score starts at 100 and each weather factor takes away its impact
//! multiplied by the user's weight for that factor. An impact is the factor's
//! share of the 100 points scaled by how far the observation strays from the
//! ideal, saturating at a per-factor cap.

use serde::Serialize;

use crate::{model::WeatherObservation, preference::PreferenceVector};

pub const MAX_SCORE: f64 = 100.0;

// Factor shares of the score; they add up to MAX_SCORE.
pub const TEMPERATURE_SHARE: f64 = 40.0;
pub const RAIN_SHARE: f64 = 30.0;
pub const WIND_SHARE: f64 = 20.0;
pub const CLOUDS_SHARE: f64 = 10.0;

const TEMP_IDEAL_MIN: f64 = 15.0;
const TEMP_IDEAL_MAX: f64 = 25.0;
/// Degrees outside the ideal range at which the temperature penalty is full.
const TEMP_CAP: f64 = 10.0;
/// mm/h of rain counted as a full rain penalty.
const RAIN_CAP: f64 = 5.0;
/// Upper limit of a light breeze, m/s.
const WIND_IDEAL_MAX: f64 = 3.0;
/// Wind speed at which umbrellas stop being usable, m/s.
const WIND_CAP: f64 = 11.0;

/// Per-factor detail behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub temperature_impact: f64,
    pub rain_impact: f64,
    pub clouds_impact: f64,
    pub wind_impact: f64,
    pub temperature_penalty: f64,
    pub rain_penalty: f64,
    pub clouds_penalty: f64,
    pub wind_penalty: f64,
    pub score: f64,
}

/// Score an observation for the given preferences, rounded to one decimal.
///
/// The result never drops below zero. There is no upper clamp: with every
/// impact non-negative the score cannot exceed [`MAX_SCORE`] for sane inputs,
/// but nonsensical observations (e.g. negative rain) are not corrected.
pub fn score(observation: &WeatherObservation, preferences: &PreferenceVector) -> f64 {
    breakdown(observation, preferences).score
}

pub fn breakdown(observation: &WeatherObservation, preferences: &PreferenceVector) -> ScoreBreakdown {
    let temperature_impact = temperature_impact(observation.temperature_c);
    let rain_impact = rain_impact(observation.rain_last_hour_mm);
    let clouds_impact = clouds_impact(observation.cloud_cover_pct);
    let wind_impact = wind_impact(observation.wind_speed_mps);

    let temperature_penalty = temperature_impact * preferences.temperature;
    let rain_penalty = rain_impact * preferences.rain;
    let clouds_penalty = clouds_impact * preferences.clouds;
    let wind_penalty = wind_impact * preferences.wind;

    let raw = MAX_SCORE - (temperature_penalty + rain_penalty + clouds_penalty + wind_penalty);

    ScoreBreakdown {
        temperature_impact,
        rain_impact,
        clouds_impact,
        wind_impact,
        temperature_penalty,
        rain_penalty,
        clouds_penalty,
        wind_penalty,
        score: floor_at_zero(round_one_decimal(raw)),
    }
}

fn temperature_impact(temperature_c: f64) -> f64 {
    let deviation = if temperature_c < TEMP_IDEAL_MIN {
        TEMP_IDEAL_MIN - temperature_c
    } else if temperature_c > TEMP_IDEAL_MAX {
        temperature_c - TEMP_IDEAL_MAX
    } else {
        return 0.0;
    };
    (deviation / TEMP_CAP).min(1.0) * TEMPERATURE_SHARE
}

fn rain_impact(rain_mm: f64) -> f64 {
    (rain_mm / RAIN_CAP).min(1.0) * RAIN_SHARE
}

fn clouds_impact(cloud_cover_pct: f64) -> f64 {
    cloud_cover_pct / 100.0 * CLOUDS_SHARE
}

fn wind_impact(wind_mps: f64) -> f64 {
    if wind_mps <= WIND_IDEAL_MAX {
        return 0.0;
    }
    let deviation = wind_mps - WIND_IDEAL_MAX;
    (deviation / (WIND_CAP - WIND_IDEAL_MAX)).min(1.0) * WIND_SHARE
}

// Fixed-precision formatting rounds the exact binary value, ties to even.
fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

// Also turns -0.0 into 0.0.
fn floor_at_zero(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}

/// Qualitative reading of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Excellent,
    Good,
    Average,
    BelowAverage,
    Terrible,
}

impl Verdict {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 85.0 => Verdict::Excellent,
            s if s >= 70.0 => Verdict::Good,
            s if s >= 50.0 => Verdict::Average,
            s if s >= 25.0 => Verdict::BelowAverage,
            _ => Verdict::Terrible,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Excellent => "These are excellent conditions! What are you waiting for?",
            Verdict::Good => "These are good conditions for a walk!",
            Verdict::Average => "These are average conditions for a walk.",
            Verdict::BelowAverage => {
                "The conditions are below average, later might be a better idea perhaps..?"
            }
            Verdict::Terrible => {
                "The conditions are terrible! I'd recommend staying in and watching a movie. \
                 I heard Gladiator is a good one..."
            }
        }
    }
}
