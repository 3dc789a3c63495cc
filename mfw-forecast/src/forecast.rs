use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Which numerical model a value came from.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Model {
    Primary,
    Secondary,
}

/// One timestep of one forecast model.
///
/// Heights are meters, periods seconds, wind speeds knots and directions
/// degrees clockwise from north (the direction the swell or wind comes from).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastStep {
    pub timestamp: DateTime<Utc>,
    pub wave_height: f64,
    #[serde(default)]
    pub wave_height_max: Option<f64>,
    #[serde(default)]
    pub swell_period: f64,
    #[serde(default)]
    pub swell_direction: f64,
    #[serde(default)]
    pub wind_speed: f64,
    #[serde(default)]
    pub wind_gust: Option<f64>,
    #[serde(default)]
    pub wind_direction: f64,
    /// Swell energy in kilojoules.
    #[serde(default)]
    pub energy: Option<f64>,
    /// Surf quality rating, 0 (flat) through 5 (epic).
    #[serde(default)]
    pub rating: Option<u8>,
}

/// Output of both forecast models for one spot.
///
/// The two arrays are indexed by timestep and may differ in length. A
/// `null` entry marks a timestep the model did not produce.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelForecast {
    #[serde(default)]
    pub primary: Vec<Option<ForecastStep>>,
    #[serde(default)]
    pub secondary: Vec<Option<ForecastStep>>,
    /// Spot's local offset from UTC in minutes, used for time labels.
    #[serde(default)]
    pub utc_offset: Option<i32>,
}

impl ModelForecast {
    /// Number of timesteps covered by at least one model.
    pub fn len(&self) -> usize {
        self.primary.len().max(self.secondary.len())
    }

    pub fn offset(&self) -> FixedOffset {
        offset_from_minutes(self.utc_offset)
    }

    /// True when neither model produced a single step.
    pub fn is_empty(&self) -> bool {
        self.primary.iter().chain(self.secondary.iter()).all(Option::is_none)
    }
}

/// A fixed offset from an optional minute count, UTC when absent or out of range.
pub fn offset_from_minutes(minutes: Option<i32>) -> FixedOffset {
    minutes
        .and_then(|m| m.checked_mul(60))
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}
