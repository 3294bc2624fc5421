use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::{
    Config,
    error::{Result, WalkError},
    model::WeatherObservation,
    provider::openweather::OpenWeatherProvider,
};

pub mod openweather;

/// Source of raw current-weather records.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch the raw record for `city`. One attempt, bounded by the provider's timeout.
    async fn fetch(&self, city: &str) -> Result<Value>;
}

/// Fetch a record and validate it into an observation.
pub async fn fetch_observation(provider: &dyn WeatherProvider, city: &str) -> Result<WeatherObservation> {
    let record = provider.fetch(city).await?;
    let observation = WeatherObservation::from_record(&record)?;
    tracing::debug!(
        provider = provider.name(),
        city = %observation.city,
        country = %observation.country,
        "weather observation built"
    );
    Ok(observation)
}

/// Construct the OpenWeather provider from config, with an already resolved API key.
pub fn provider_from_config(config: &Config, api_key: &str) -> Result<Box<dyn WeatherProvider>> {
    if api_key.trim().is_empty() {
        return Err(WalkError::Config("API key must not be empty".to_string()));
    }

    let provider = OpenWeatherProvider::new(api_key.to_owned(), config.base_url(), config.timeout())?;
    Ok(Box::new(provider))
}
