use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hourly weather as parallel arrays, as delivered by the host page.
///
/// `time` drives the row count. The other arrays may be shorter (or longer);
/// missing entries are treated as absent values, never as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyWeather {
    #[serde(default)]
    pub time: Vec<DateTime<Utc>>,
    /// Air temperature in degrees Celsius.
    #[serde(default)]
    pub temperature: Vec<Option<f64>>,
    /// Precipitation in millimeters.
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
    /// Cloud cover percentage (0-100).
    #[serde(default)]
    pub cloud_cover: Vec<Option<f64>>,
    /// WMO weather interpretation code.
    #[serde(default)]
    pub weather_code: Vec<Option<u16>>,
    /// Wind speed in knots.
    #[serde(default)]
    pub wind_speed: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_direction: Vec<Option<f64>>,
}

impl HourlyWeather {
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}
