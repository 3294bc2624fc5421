use anyhow::Context;
use clap::{ArgAction, Parser};
use std::io::IsTerminal;
use walkability_core::{
    Config, PreferenceVector, WalkError, WeatherObservation, breakdown, fetch_observation,
    provider_from_config, config::API_KEY_ENV, preference::REFERENCE_RATING,
};

use crate::report;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "walkability",
    version,
    about = "Is the weather good enough for your preferences to go for a walk?"
)]
pub struct Cli {
    /// Your location (city name).
    #[arg(short, long)]
    pub location: String,

    /// How important the temperature is to you (1 = not important, 5 = very important).
    #[arg(short, long, default_value_t = REFERENCE_RATING, allow_negative_numbers = true)]
    pub temperature: i64,

    /// How important it is to you that it is NOT raining (1-5).
    #[arg(short, long, default_value_t = REFERENCE_RATING, allow_negative_numbers = true)]
    pub rain: i64,

    /// How important the level of cloud cover is to you (1-5).
    #[arg(short, long, default_value_t = REFERENCE_RATING, allow_negative_numbers = true)]
    pub clouds: i64,

    /// How important the level of wind is to you (1-5).
    #[arg(short, long, default_value_t = REFERENCE_RATING, allow_negative_numbers = true)]
    pub wind: i64,

    /// Do you only go out for a walk in daytime? ('yes' or 'no')
    #[arg(short, long, default_value = "no")]
    pub daytime: String,

    /// OpenWeather API key; overrides the environment and the config file.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Store the API key in the config file for later runs.
    #[arg(long)]
    pub save_key: bool,

    /// Show how each factor contributed (-vv for debug logs).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Reported,
    /// The user walks only by day and it is currently night.
    Night,
}

pub const NIGHT_MESSAGE: &str =
    "It's currently night time, and you indicated that you only prefer walking during the day.";

/// Ends the run before reporting when the user walks only by day and the sun is down.
pub fn early_exit(preferences: &PreferenceVector, observation: &WeatherObservation) -> Option<Outcome> {
    (preferences.daytime_only && !observation.is_daytime()).then_some(Outcome::Night)
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<Outcome> {
        let preferences = PreferenceVector::normalize(
            self.temperature,
            self.rain,
            self.clouds,
            self.wind,
            &self.daytime,
        )?;
        tracing::debug!(?preferences, "preferences normalized");

        let mut config = Config::load()?;
        let api_key = self.resolve_api_key(&config)?;

        if self.save_key {
            config.set_api_key(api_key.clone());
            let path = config.save().context("Failed to save API key")?;
            tracing::info!(path = %path.display(), "API key saved");
        }

        let provider = provider_from_config(&config, &api_key)?;
        let observation = fetch_observation(provider.as_ref(), &self.location).await?;

        // Score before the daytime check so the result is logged either way.
        let scored = breakdown(&observation, &preferences);
        tracing::info!(score = scored.score, daytime = observation.is_daytime(), "walkability scored");

        if let Some(early) = early_exit(&preferences, &observation) {
            return Ok(early);
        }

        let color = std::io::stdout().is_terminal();
        print!("{}", report::render(&observation, &preferences, &scored, self.verbose > 0, color));

        Ok(Outcome::Reported)
    }

    fn resolve_api_key(&self, config: &Config) -> anyhow::Result<String> {
        if let Some(key) = config.resolve_api_key(self.api_key.as_deref()) {
            return Ok(key);
        }

        if !std::io::stdin().is_terminal() {
            return Err(WalkError::Config(format!(
                "no OpenWeather API key configured.\n\
                 Hint: pass --api-key, set {API_KEY_ENV}, or run interactively with --save-key."
            ))
            .into());
        }

        let key = inquire::Password::new("OpenWeather API key:")
            .without_confirmation()
            .with_display_mode(inquire::PasswordDisplayMode::Masked)
            .prompt()
            .context("Failed to read API key")?;

        if key.trim().is_empty() {
            return Err(WalkError::Config("API key must not be empty".to_string()).into());
        }

        Ok(key.trim().to_string())
    }
}
