use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, WalkError};

/// Current weather for one location, as reported by the provider.
///
/// Built once from a raw provider record and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherObservation {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub cloud_cover_pct: f64,
    pub wind_speed_mps: f64,
    /// Defaults to 0 when the provider omits the rain block.
    pub rain_last_hour_mm: f64,
    pub sunrise: DateTime<Utc>,
    pub current_time: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl WeatherObservation {
    /// Build an observation from an OpenWeather "current weather" JSON record.
    ///
    /// Every field except `rain.1h` is required. A field that is absent yields
    /// a "missing required field" error; one that is present with the wrong
    /// type yields a "malformed field" error.
    pub fn from_record(record: &Value) -> Result<Self> {
        Ok(Self {
            city: string_at(record, &["name"])?,
            country: string_at(record, &["sys", "country"])?,
            temperature_c: number_at(record, &["main", "temp"])?,
            cloud_cover_pct: number_at(record, &["clouds", "all"])?,
            wind_speed_mps: number_at(record, &["wind", "speed"])?,
            rain_last_hour_mm: rain_at(record)?,
            sunrise: timestamp_at(record, &["sys", "sunrise"])?,
            current_time: timestamp_at(record, &["dt"])?,
            sunset: timestamp_at(record, &["sys", "sunset"])?,
        })
    }

    /// True when the observation time lies between sunrise and sunset, both inclusive.
    pub fn is_daytime(&self) -> bool {
        self.sunrise <= self.current_time && self.current_time <= self.sunset
    }
}

fn lookup<'a>(record: &'a Value, path: &[&str]) -> Result<&'a Value> {
    let mut current = record;
    for (depth, key) in path.iter().enumerate() {
        let object = current
            .as_object()
            .ok_or_else(|| match depth {
                0 => WalkError::malformed("record"),
                _ => WalkError::malformed(&path[..depth].join(".")),
            })?;
        current = object
            .get(*key)
            .ok_or_else(|| WalkError::missing(&path[..=depth].join(".")))?;
    }
    Ok(current)
}

fn string_at(record: &Value, path: &[&str]) -> Result<String> {
    lookup(record, path)?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| WalkError::malformed(&path.join(".")))
}

fn number_at(record: &Value, path: &[&str]) -> Result<f64> {
    lookup(record, path)?
        .as_f64()
        .ok_or_else(|| WalkError::malformed(&path.join(".")))
}

fn timestamp_at(record: &Value, path: &[&str]) -> Result<DateTime<Utc>> {
    lookup(record, path)?
        .as_i64()
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .ok_or_else(|| WalkError::malformed(&path.join(".")))
}

// The provider leaves out `rain` entirely (or `rain.1h`) when it is dry.
fn rain_at(record: &Value) -> Result<f64> {
    let rain = match record.get("rain") {
        None | Some(Value::Null) => return Ok(0.0),
        Some(rain) => rain
            .as_object()
            .ok_or_else(|| WalkError::malformed("rain"))?,
    };

    match rain.get("1h") {
        None | Some(Value::Null) => Ok(0.0),
        Some(v) => v.as_f64().ok_or_else(|| WalkError::malformed("rain.1h")),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use serde_json::json;

    /// A slightly trimmed OpenWeather sample, tuned so every factor sits at its ideal.
    pub fn sample_record() -> Value {
        json!({
            "coord": {"lon": 7.367, "lat": 45.133},
            "weather": [{"id": 501, "main": "Rain", "description": "moderate rain", "icon": "10d"}],
            "base": "stations",
            "main": {"temp": 20, "feels_like": 19.3, "pressure": 1021, "humidity": 60},
            "visibility": 10000,
            "wind": {"speed": 3, "deg": 121, "gust": 3.47},
            "clouds": {"all": 0},
            "dt": 1726660758,
            "sys": {"type": 1, "id": 6736, "country": "IT", "sunrise": 1726636384, "sunset": 1726680975},
            "timezone": 7200,
            "id": 3165523,
            "name": "Province of Turin",
            "cod": 200
        })
    }

    /// Fresh observation for scoring scenarios; sun times are irrelevant to the score.
    pub fn observation(temperature_c: f64, rain_mm: f64, wind_mps: f64, clouds_pct: f64) -> WeatherObservation {
        let noon = DateTime::from_timestamp(1_726_660_758, 0).unwrap();
        WeatherObservation {
            city: "Province of Turin".to_string(),
            country: "IT".to_string(),
            temperature_c,
            cloud_cover_pct: clouds_pct,
            wind_speed_mps: wind_mps,
            rain_last_hour_mm: rain_mm,
            sunrise: noon - chrono::Duration::hours(6),
            current_time: noon,
            sunset: noon + chrono::Duration::hours(6),
        }
    }
}
