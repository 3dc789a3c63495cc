//! Day-by-day surf report summaries built from normalized chart data.

use crate::chart::NormalizedChartDatum;
use crate::compass::{compass_point, mean_direction};
use crate::format::{day_heading, format_height_range, format_period, format_wind_speed, rating_label, round1};
use chrono::FixedOffset;
use mfw_forecast::units::UnitPreferences;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub day: String,
    pub heading: String,
    pub surf_min: f64,
    pub surf_max: f64,
    pub surf_range: String,
    pub period_avg: f64,
    pub period_display: String,
    pub swell_compass: &'static str,
    pub wind_avg: f64,
    pub wind_display: String,
    pub wind_compass: &'static str,
    pub rating: Option<u8>,
    pub rating_label: Option<&'static str>,
    pub steps: usize,
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        round1(sum / n as f64)
    }
}

/// Group consecutive timesteps by spot-local day and summarize each day.
///
/// Heights and wind are taken as already converted to `prefs` units.
pub fn summarize_days(
    datums: &[NormalizedChartDatum],
    prefs: &UnitPreferences,
    offset: &FixedOffset,
) -> Vec<DaySummary> {
    datums
        .chunk_by(|a, b| a.day == b.day)
        .map(|day| {
            let surf_min = day.iter().map(|d| d.surf_height).fold(f64::INFINITY, f64::min);
            let surf_max = day
                .iter()
                .map(|d| d.surf_height_max.unwrap_or(d.surf_height).max(d.surf_height))
                .fold(f64::NEG_INFINITY, f64::max);
            let swell_dirs: Vec<f64> = day.iter().map(|d| d.swell_direction).collect();
            let wind_dirs: Vec<f64> = day.iter().map(|d| d.wind_direction).collect();
            let rating = day.iter().filter_map(|d| d.rating).max();
            let period_avg = average(day.iter().map(|d| d.swell_period));
            let wind_avg = average(day.iter().map(|d| d.wind_speed));
            DaySummary {
                day: day[0].day.clone(),
                heading: day_heading(&day[0].timestamp, offset),
                surf_min,
                surf_max,
                surf_range: format_height_range(surf_min, surf_max, prefs.surf_height),
                period_avg,
                period_display: format_period(period_avg),
                swell_compass: mean_direction(&swell_dirs).map(compass_point).unwrap_or(""),
                wind_avg,
                wind_display: format_wind_speed(wind_avg, prefs.wind_speed),
                wind_compass: mean_direction(&wind_dirs).map(compass_point).unwrap_or(""),
                rating,
                rating_label: rating.map(rating_label),
                steps: day.len(),
            }
        })
        .collect()
}
