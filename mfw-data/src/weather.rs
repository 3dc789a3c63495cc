//! Hourly weather normalization.

use crate::color::{wind_speed_color, Rgb};
use crate::compass::{arrow_rotation, compass_point};
use crate::format::{clock_label, day_key, format_temperature, format_wind_speed, round1};
use chrono::{DateTime, FixedOffset, Utc};
use mfw_forecast::units::UnitPreferences;
use mfw_forecast::weather::HourlyWeather;
use serde::Serialize;

/// One hour of weather in display units.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRow {
    pub time: DateTime<Utc>,
    pub label: String,
    pub day: String,
    pub temperature: Option<f64>,
    pub temperature_display: Option<String>,
    pub precipitation: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub icon: &'static str,
    pub condition: &'static str,
    pub wind_speed: Option<f64>,
    pub wind_display: Option<String>,
    pub wind_compass: Option<&'static str>,
    pub wind_arrow: Option<f64>,
    pub wind_color: Option<Rgb>,
}

fn at<T: Copy>(values: &[Option<T>], i: usize) -> Option<T> {
    values.get(i).copied().flatten()
}

/// Zip the parallel hourly arrays into rows.
///
/// Rows follow `time`; any other array that is shorter leaves `None` in
/// the remaining rows, and extra trailing values are ignored.
pub fn normalize_hourly_weather(
    hourly: &HourlyWeather,
    prefs: &UnitPreferences,
    offset: &FixedOffset,
) -> Vec<WeatherRow> {
    let mismatched = [
        hourly.temperature.len(),
        hourly.precipitation.len(),
        hourly.cloud_cover.len(),
        hourly.weather_code.len(),
        hourly.wind_speed.len(),
        hourly.wind_direction.len(),
    ]
    .iter()
    .any(|len| *len != 0 && *len != hourly.time.len());
    if mismatched {
        log::warn!(
            "Hourly weather arrays differ in length from {} timestamps; padding with gaps",
            hourly.time.len()
        );
    }

    hourly
        .time
        .iter()
        .enumerate()
        .map(|(i, time)| {
            let code = at(&hourly.weather_code, i);
            let cloud_cover = at(&hourly.cloud_cover, i);
            let (icon, condition) = match code {
                Some(code) => weather_icon(code),
                None => icon_from_cloud_cover(cloud_cover),
            };
            let wind_knots = at(&hourly.wind_speed, i);
            let wind_direction = at(&hourly.wind_direction, i);
            let temperature = at(&hourly.temperature, i).map(|c| round1(prefs.temperature.from_celsius(c)));
            let wind_speed = wind_knots.map(|k| round1(prefs.wind_speed.from_knots(k)));
            WeatherRow {
                time: *time,
                label: clock_label(time, offset),
                day: day_key(time, offset),
                temperature,
                temperature_display: temperature.map(|t| format_temperature(t, prefs.temperature)),
                precipitation: at(&hourly.precipitation, i).map(round1),
                cloud_cover,
                icon,
                condition,
                wind_speed,
                wind_display: wind_speed.map(|w| format_wind_speed(w, prefs.wind_speed)),
                wind_compass: wind_direction.map(compass_point),
                wind_arrow: wind_direction.map(arrow_rotation),
                wind_color: wind_knots.map(wind_speed_color),
            }
        })
        .collect()
}

/// Map a WMO weather interpretation code to an icon name and label.
pub fn weather_icon(code: u16) -> (&'static str, &'static str) {
    match code {
        0 => ("clear", "Clear"),
        1 => ("mostly-clear", "Mostly clear"),
        2 => ("partly-cloudy", "Partly cloudy"),
        3 => ("overcast", "Overcast"),
        45 | 48 => ("fog", "Fog"),
        51 | 53 | 55 | 56 | 57 => ("drizzle", "Drizzle"),
        61 | 63 | 66 => ("rain", "Rain"),
        65 | 67 => ("heavy-rain", "Heavy rain"),
        71 | 73 | 75 | 77 => ("snow", "Snow"),
        80..=82 => ("showers", "Showers"),
        85 | 86 => ("snow", "Snow showers"),
        95..=99 => ("thunderstorm", "Thunderstorm"),
        _ => ("unknown", "Unknown"),
    }
}

fn icon_from_cloud_cover(cloud_cover: Option<f64>) -> (&'static str, &'static str) {
    match cloud_cover {
        Some(c) if c < 20.0 => weather_icon(0),
        Some(c) if c < 50.0 => weather_icon(1),
        Some(c) if c < 85.0 => weather_icon(2),
        Some(_) => weather_icon(3),
        None => ("unknown", "Unknown"),
    }
}

/// Daily temperature extremes over normalized rows, keyed by day.
pub fn daily_temperature_range(rows: &[WeatherRow]) -> Vec<(String, f64, f64)> {
    let mut out: Vec<(String, f64, f64)> = Vec::new();
    for row in rows {
        let Some(t) = row.temperature else { continue };
        if let Some((day, lo, hi)) = out.last_mut() {
            if *day == row.day {
                *lo = lo.min(t);
                *hi = hi.max(t);
                continue;
            }
        }
        out.push((row.day.clone(), t, t));
    }
    out
}
