//! One [`WidgetFamily`](crate::controller::WidgetFamily) strategy per bundle.

mod advanced;
mod charts;
mod subscription;
mod surf_report;
mod tides;
mod weather;

pub use advanced::AdvancedFamily;
pub use charts::ChartsFamily;
pub use subscription::SubscriptionFamily;
pub use surf_report::SurfReportFamily;
pub use tides::TidesFamily;
pub use weather::WeatherFamily;

use crate::error::WidgetError;
use mfw_forecast::event::Family;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a family payload, mapping schema mismatches to `InvalidPayload`.
pub(crate) fn decode<T: DeserializeOwned>(family: Family, data: &Value) -> Result<T, WidgetError> {
    T::deserialize(data).map_err(|e| WidgetError::InvalidPayload {
        family,
        reason: e.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    /// A two-model forecast: eight 3-hourly primary steps, five secondary.
    pub fn forecast() -> Value {
        let step = |i: usize, height: f64| {
            json!({
                "timestamp": format!("2026-10-18T{:02}:00:00Z", i * 3),
                "waveHeight": height,
                "waveHeightMax": height + 0.4,
                "swellPeriod": 12.0,
                "swellDirection": 285.0,
                "windSpeed": 6.0 + i as f64,
                "windDirection": 45.0,
                "energy": 400.0,
                "rating": 2
            })
        };
        json!({
            "primary": (0..8).map(|i| step(i, 1.0)).collect::<Vec<_>>(),
            "secondary": (0..5).map(|i| step(i, 1.5)).collect::<Vec<_>>(),
        })
    }
}
