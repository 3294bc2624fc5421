//! Human-friendly rendering of a scored observation.

use crossterm::style::Stylize;
use std::fmt::{Display, Write};
use walkability_core::{PreferenceVector, ScoreBreakdown, Verdict, WeatherObservation};

/// Render the report printed after a successful run.
pub fn render(
    observation: &WeatherObservation,
    preferences: &PreferenceVector,
    scored: &ScoreBreakdown,
    verbose: bool,
    color: bool,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "Weather in {}, {} right now:", observation.city, observation.country);
    let _ = writeln!(
        out,
        "🌡️  Temperature is {} degrees Celsius.",
        highlight(&observation.temperature_c, color)
    );
    if observation.rain_last_hour_mm > 0.0 {
        let _ = writeln!(
            out,
            "🌧️  Rain in the last hour was {} mm.",
            highlight(&observation.rain_last_hour_mm, color)
        );
    } else {
        let _ = writeln!(out, "🌧️  {} rain in the last hour.", highlight(&"No", color));
    }
    let _ = writeln!(out, "💨 Wind speed is {} m/s.", highlight(&observation.wind_speed_mps, color));
    let cloud_cover = format!("{}%", observation.cloud_cover_pct);
    let _ = writeln!(out, "⛅️ Cloud cover is {}.", highlight(&cloud_cover, color));

    if verbose {
        let _ = writeln!(out);
        let _ = writeln!(out, "Score breakdown (impact x weight = penalty):");
        let rows = [
            ("temperature", scored.temperature_impact, preferences.temperature, scored.temperature_penalty),
            ("rain", scored.rain_impact, preferences.rain, scored.rain_penalty),
            ("wind", scored.wind_impact, preferences.wind, scored.wind_penalty),
            ("clouds", scored.clouds_impact, preferences.clouds, scored.clouds_penalty),
        ];
        for (factor, impact, weight, penalty) in rows {
            let _ = writeln!(out, "  {factor:<12} {impact:>5.1} x {weight:.2} = {penalty:>5.1}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Based on your preferences, the weather score is: {} out of 100.",
        highlight(&scored.score, color)
    );
    let _ = writeln!(out, "{}", Verdict::from_score(scored.score).message());

    out
}

fn highlight(value: &dyn Display, color: bool) -> String {
    if color {
        value.to_string().blue().to_string()
    } else {
        value.to_string()
    }
}
