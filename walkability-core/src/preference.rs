use serde::Serialize;

use crate::error::{Result, WalkError};

/// Rating every factor gets when the user does not give one; also the divisor
/// that turns a rating into a weight, so the default rating weighs exactly 1.
pub const REFERENCE_RATING: i64 = 3;
pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// How much each weather factor matters to the user, relative to an average concern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreferenceVector {
    pub temperature: f64,
    pub rain: f64,
    pub clouds: f64,
    pub wind: f64,
    /// Only walk between sunrise and sunset.
    pub daytime_only: bool,
}

impl PreferenceVector {
    /// Turn raw 1–5 ratings and a "yes"/"no" daytime answer into weights.
    pub fn normalize(temperature: i64, rain: i64, clouds: i64, wind: i64, daytime: &str) -> Result<Self> {
        let ratings = [temperature, rain, clouds, wind];
        if !ratings.iter().all(|r| (MIN_RATING..=MAX_RATING).contains(r)) {
            return Err(WalkError::InvalidPreference(format!(
                "Preferences for temperature, rain, cloud cover and wind must be between {MIN_RATING}-{MAX_RATING}."
            )));
        }

        let daytime_only = match daytime.trim().to_lowercase().as_str() {
            "yes" => true,
            "no" => false,
            _ => {
                return Err(WalkError::InvalidPreference(
                    "Daytime preference must be 'yes' or 'no'.".to_string(),
                ));
            }
        };

        Ok(Self {
            temperature: weight(temperature),
            rain: weight(rain),
            clouds: weight(clouds),
            wind: weight(wind),
            daytime_only,
        })
    }
}

impl Default for PreferenceVector {
    fn default() -> Self {
        Self { temperature: 1.0, rain: 1.0, clouds: 1.0, wind: 1.0, daytime_only: false }
    }
}

fn weight(rating: i64) -> f64 {
    rating as f64 / REFERENCE_RATING as f64
}
