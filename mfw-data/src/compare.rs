//! Side-by-side comparison of the two forecast models.

use crate::format::{format_height, round1, time_label};
use chrono::{DateTime, Utc};
use mfw_forecast::forecast::{ForecastStep, ModelForecast};
use mfw_forecast::units::UnitPreferences;
use serde::Serialize;

/// Both models' values at one timestep. `difference` is secondary minus
/// primary and only present when both models produced the step.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelComparison {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub label: String,
    pub primary_height: Option<f64>,
    pub secondary_height: Option<f64>,
    pub primary_display: Option<String>,
    pub secondary_display: Option<String>,
    pub difference: Option<f64>,
    pub primary_period: Option<f64>,
    pub secondary_period: Option<f64>,
    pub primary_wind: Option<f64>,
    pub secondary_wind: Option<f64>,
}

/// Pair the models index by index over the longer of the two arrays.
/// Indexes where neither model has a step are skipped.
pub fn compare_models(forecast: &ModelForecast, prefs: &UnitPreferences) -> Vec<ModelComparison> {
    let offset = forecast.offset();
    let step_at = |steps: &[Option<ForecastStep>], i: usize| -> Option<ForecastStep> {
        steps.get(i).cloned().flatten()
    };
    (0..forecast.len())
        .filter_map(|i| {
            let primary = step_at(&forecast.primary, i);
            let secondary = step_at(&forecast.secondary, i);
            let timestamp = secondary.as_ref().or(primary.as_ref())?.timestamp;
            let height = |s: &ForecastStep| round1(prefs.surf_height.from_meters(s.wave_height));
            let wind = |s: &ForecastStep| round1(prefs.wind_speed.from_knots(s.wind_speed));
            let primary_height = primary.as_ref().map(height);
            let secondary_height = secondary.as_ref().map(height);
            Some(ModelComparison {
                index: i,
                timestamp,
                label: time_label(&timestamp, &offset),
                primary_height,
                secondary_height,
                primary_display: primary_height.map(|h| format_height(h, prefs.surf_height)),
                secondary_display: secondary_height.map(|h| format_height(h, prefs.surf_height)),
                difference: primary_height
                    .zip(secondary_height)
                    .map(|(p, s)| round1(s - p)),
                primary_period: primary.as_ref().map(|s| s.swell_period),
                secondary_period: secondary.as_ref().map(|s| s.swell_period),
                primary_wind: primary.as_ref().map(wind),
                secondary_wind: secondary.as_ref().map(wind),
            })
        })
        .collect()
}

/// Mean absolute height difference where both models overlap.
pub fn mean_absolute_difference(rows: &[ModelComparison]) -> Option<f64> {
    let diffs: Vec<f64> = rows.iter().filter_map(|r| r.difference).map(f64::abs).collect();
    if diffs.is_empty() {
        return None;
    }
    Some(round1(diffs.iter().sum::<f64>() / diffs.len() as f64))
}
