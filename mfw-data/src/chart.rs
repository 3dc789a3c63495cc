//! Normalization of a two-model forecast into per-timestep chart data.
//!
//! Each surviving timestep of [`merge_models`] becomes one
//! [`NormalizedChartDatum`] with heights and wind converted into the
//! reader's units. Chart renderers then take a projection of these records
//! for their chart type (see [`project`]).

use crate::color::{wind_speed_color, Rgb};
use crate::compass::{arrow_rotation, compass_point};
use crate::format::{
    day_key, format_energy, format_height, format_height_range, format_period, format_wind_speed, round1,
    time_label,
};
use crate::merge::merge_models;
use chrono::{DateTime, Utc};
use mfw_forecast::forecast::{Model, ModelForecast};
use mfw_forecast::units::UnitPreferences;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One merged forecast timestep, ready for charting.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedChartDatum {
    /// Index of the timestep in the model arrays.
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    /// x-axis label in spot-local time.
    pub label: String,
    /// Spot-local day, "YYYY-MM-DD".
    pub day: String,
    pub surf_height: f64,
    pub surf_height_max: Option<f64>,
    pub swell_period: f64,
    pub swell_direction: f64,
    pub swell_compass: &'static str,
    pub swell_arrow: f64,
    pub wind_speed: f64,
    pub wind_gust: Option<f64>,
    pub wind_direction: f64,
    pub wind_compass: &'static str,
    pub wind_arrow: f64,
    /// Wind color from the knots scale, independent of display unit.
    pub wind_color: Rgb,
    pub energy: Option<f64>,
    pub rating: Option<u8>,
    pub model: Model,
}

/// Merge both models and convert every timestep into display units.
///
/// Timesteps neither model produced are dropped.
pub fn normalize_chart_data(
    forecast: &ModelForecast,
    prefs: &UnitPreferences,
) -> Vec<NormalizedChartDatum> {
    let offset = forecast.offset();
    merge_models(&forecast.primary, &forecast.secondary)
        .into_iter()
        .enumerate()
        .filter_map(|(index, slot)| {
            let sourced = slot?;
            let step = sourced.value;
            Some(NormalizedChartDatum {
                index,
                timestamp: step.timestamp,
                label: time_label(&step.timestamp, &offset),
                day: day_key(&step.timestamp, &offset),
                surf_height: round1(prefs.surf_height.from_meters(step.wave_height)),
                surf_height_max: step
                    .wave_height_max
                    .map(|h| round1(prefs.surf_height.from_meters(h))),
                swell_period: round1(step.swell_period),
                swell_direction: step.swell_direction,
                swell_compass: compass_point(step.swell_direction),
                swell_arrow: arrow_rotation(step.swell_direction),
                wind_speed: round1(prefs.wind_speed.from_knots(step.wind_speed)),
                wind_gust: step.wind_gust.map(|g| round1(prefs.wind_speed.from_knots(g))),
                wind_direction: step.wind_direction,
                wind_compass: compass_point(step.wind_direction),
                wind_arrow: arrow_rotation(step.wind_direction),
                wind_color: wind_speed_color(step.wind_speed),
                energy: step.energy,
                rating: step.rating,
                model: sourced.model,
            })
        })
        .collect()
}

/// The chart variants a `charts` container can ask for via `data-chart-type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Swell,
    Wind,
    Period,
    Energy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChartType(pub String);

impl fmt::Display for UnknownChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown chart type: {}", self.0)
    }
}

impl std::error::Error for UnknownChartType {}

impl FromStr for ChartType {
    type Err = UnknownChartType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "swell" | "surf" | "height" => Ok(ChartType::Swell),
            "wind" => Ok(ChartType::Wind),
            "period" => Ok(ChartType::Period),
            "energy" => Ok(ChartType::Energy),
            _ => Err(UnknownChartType(s.to_string())),
        }
    }
}

impl ChartType {
    pub fn title(&self) -> &'static str {
        match self {
            ChartType::Swell => "Surf Height",
            ChartType::Wind => "Wind",
            ChartType::Period => "Swell Period",
            ChartType::Energy => "Swell Energy",
        }
    }
}

/// A single point handed to a chart renderer.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub label: String,
    pub day: String,
    pub value: f64,
    /// Upper band (surf max, wind gust) when the chart draws one.
    pub upper: Option<f64>,
    /// Arrow rotation for direction markers.
    pub arrow: Option<f64>,
    pub compass: Option<&'static str>,
    pub color: Option<Rgb>,
    pub model: Model,
    /// `value` (and `upper`) formatted in the reader's unit.
    pub display: String,
}

fn display_for(chart_type: ChartType, value: f64, upper: Option<f64>, prefs: &UnitPreferences) -> String {
    match chart_type {
        ChartType::Swell => match upper {
            Some(upper) => format_height_range(value, upper, prefs.surf_height),
            None => format_height(value, prefs.surf_height),
        },
        ChartType::Wind => match upper {
            Some(gust) => format!(
                "{} (gust {})",
                format_wind_speed(value, prefs.wind_speed),
                format_wind_speed(gust, prefs.wind_speed)
            ),
            None => format_wind_speed(value, prefs.wind_speed),
        },
        ChartType::Period => format_period(value),
        ChartType::Energy => format_energy(value),
    }
}

/// Project normalized data onto the series a chart type draws.
///
/// Energy charts skip timesteps without an energy value.
pub fn project(
    datums: &[NormalizedChartDatum],
    chart_type: ChartType,
    prefs: &UnitPreferences,
) -> Vec<ChartPoint> {
    datums
        .iter()
        .filter_map(|d| {
            let (value, upper, arrow, compass, color) = match chart_type {
                ChartType::Swell => (
                    d.surf_height,
                    d.surf_height_max,
                    Some(d.swell_arrow),
                    Some(d.swell_compass),
                    None,
                ),
                ChartType::Wind => (
                    d.wind_speed,
                    d.wind_gust,
                    Some(d.wind_arrow),
                    Some(d.wind_compass),
                    Some(d.wind_color),
                ),
                ChartType::Period => (d.swell_period, None, Some(d.swell_arrow), Some(d.swell_compass), None),
                ChartType::Energy => (d.energy?, None, None, None, None),
            };
            Some(ChartPoint {
                timestamp: d.timestamp,
                label: d.label.clone(),
                day: d.day.clone(),
                value,
                upper,
                arrow,
                compass,
                color,
                model: d.model,
                display: display_for(chart_type, value, upper, prefs),
            })
        })
        .collect()
}

/// Highest value (including upper bands) across a projection, for y-axis
/// domains. Zero when empty.
pub fn max_value(points: &[ChartPoint]) -> f64 {
    points
        .iter()
        .map(|p| p.upper.unwrap_or(p.value).max(p.value))
        .fold(0.0, f64::max)
}
