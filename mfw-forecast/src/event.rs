//! The `bigpipe:<family>-data` event schema.
//!
//! Every event carries a [`DataEvent`] in its `detail`. The shape of
//! `DataEvent::data` depends on the family and is decoded into one of the
//! payload structs below by the family that consumes it.

use crate::forecast::ModelForecast;
use crate::tide::TideReading;
use crate::weather::HourlyWeather;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix shared by all data-ready event names.
pub const EVENT_PREFIX: &str = "bigpipe:";

/// A widget family: one independently loaded bundle with its own event
/// name, container selector and first-paint fallback global.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    Charts,
    Weather,
    Tides,
    SurfReport,
    Subscription,
    Advanced,
}

impl Family {
    /// Kebab-case name, also the `data-component` value of its containers.
    pub fn name(&self) -> &'static str {
        match self {
            Family::Charts => "charts",
            Family::Weather => "weather",
            Family::Tides => "tides",
            Family::SurfReport => "surf-report",
            Family::Subscription => "subscription",
            Family::Advanced => "advanced",
        }
    }

    /// The DOM event name carrying this family's data, e.g. `bigpipe:tides-data`.
    pub fn event_name(&self) -> String {
        format!("{}{}-data", EVENT_PREFIX, self.name())
    }

    /// CSS selector matching this family's placeholder containers.
    pub fn container_selector(&self) -> String {
        format!("[data-component=\"{}\"]", self.name())
    }

    /// Name of the window global holding first-paint data for this family.
    pub fn fallback_global(&self) -> &'static str {
        match self {
            Family::Charts => "__MFW_CHARTS_DATA__",
            Family::Weather => "__MFW_WEATHER_DATA__",
            Family::Tides => "__MFW_TIDES_DATA__",
            Family::SurfReport => "__MFW_SURF_REPORT_DATA__",
            Family::Subscription => "__MFW_SUBSCRIPTION_DATA__",
            Family::Advanced => "__MFW_ADVANCED_DATA__",
        }
    }

    /// Families whose bundles may be deferred to browser idle time.
    pub fn is_deferrable(&self) -> bool {
        matches!(self, Family::Subscription | Family::Advanced)
    }
}

/// Payload of a `bigpipe:<family>-data` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataEvent {
    pub placeholder_id: String,
    #[serde(default)]
    pub component_type: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl DataEvent {
    pub fn new(placeholder_id: impl Into<String>, data: Value) -> Self {
        Self {
            placeholder_id: placeholder_id.into(),
            component_type: None,
            data,
        }
    }

    pub fn with_component_type(mut self, component_type: impl Into<String>) -> Self {
        self.component_type = Some(component_type.into());
        self
    }

    /// True when the event carries nothing worth rendering.
    pub fn has_empty_data(&self) -> bool {
        is_empty_payload(&self.data)
    }

    /// Look up the payload for `placeholder_id` in a family fallback global.
    ///
    /// The global may be a single payload, an array of payloads, or an
    /// object keyed by placeholder id. Keyed values that are not
    /// payload-shaped are taken as the `data` itself.
    pub fn from_fallback(global: &Value, placeholder_id: &str) -> Option<DataEvent> {
        match global {
            Value::Array(items) => items
                .iter()
                .filter_map(|item| serde_json::from_value::<DataEvent>(item.clone()).ok())
                .find(|event| event.placeholder_id == placeholder_id),
            Value::Object(map) if map.contains_key("placeholderId") => {
                serde_json::from_value::<DataEvent>(global.clone())
                    .ok()
                    .filter(|event| event.placeholder_id == placeholder_id)
            }
            Value::Object(map) => {
                let entry = map.get(placeholder_id)?;
                let data = entry.get("data").cloned().unwrap_or_else(|| entry.clone());
                let component_type = entry
                    .get("componentType")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Some(DataEvent {
                    placeholder_id: placeholder_id.to_string(),
                    component_type,
                    data,
                })
            }
            _ => None,
        }
    }
}

/// Null, empty strings, empty arrays and empty objects carry no data.
pub fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Surf report data: the merged forecast plus the spot's written report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfReportPayload {
    #[serde(flatten)]
    pub forecast: ModelForecast,
    #[serde(default)]
    pub spot_name: Option<String>,
    #[serde(default)]
    pub report: Option<SpotReport>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotReport {
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherPayload {
    #[serde(default)]
    pub hourly: HourlyWeather,
    #[serde(default)]
    pub forecast: Option<ModelForecast>,
    #[serde(default)]
    pub utc_offset: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TidesPayload {
    #[serde(default)]
    pub tides: Vec<TideReading>,
    /// Host clock at render time; used for the "now" marker.
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
    #[serde(default)]
    pub utc_offset: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPayload {
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub cta_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_names() {
        assert_eq!(Family::Charts.event_name(), "bigpipe:charts-data");
        assert_eq!(Family::SurfReport.event_name(), "bigpipe:surf-report-data");
        assert_eq!(
            Family::Tides.container_selector(),
            "[data-component=\"tides\"]"
        );
    }

    #[test]
    fn test_data_event_deserializes_camel_case() {
        let event: DataEvent = serde_json::from_value(json!({
            "placeholderId": "swell-1",
            "componentType": "charts",
            "data": {"primary": []}
        }))
        .unwrap();
        assert_eq!(event.placeholder_id, "swell-1");
        assert_eq!(event.component_type.as_deref(), Some("charts"));
        assert!(!event.has_empty_data());
    }

    #[test]
    fn test_missing_data_is_empty() {
        let event: DataEvent = serde_json::from_value(json!({"placeholderId": "x"})).unwrap();
        assert!(event.has_empty_data());
        assert!(is_empty_payload(&json!("  ")));
        assert!(is_empty_payload(&json!([])));
        assert!(!is_empty_payload(&json!(0)));
    }

    #[test]
    fn test_fallback_keyed_by_placeholder() {
        let global = json!({
            "tides-1": {"placeholderId": "tides-1", "data": {"tides": []}},
            "tides-2": {"tides": [{"time": "2026-10-18T00:00:00Z", "height": 1.0}]}
        });
        let first = DataEvent::from_fallback(&global, "tides-1").unwrap();
        assert_eq!(first.data, json!({"tides": []}));

        let second = DataEvent::from_fallback(&global, "tides-2").unwrap();
        assert_eq!(second.placeholder_id, "tides-2");
        assert!(second.data.get("tides").is_some());

        assert!(DataEvent::from_fallback(&global, "tides-3").is_none());
    }

    #[test]
    fn test_fallback_single_and_array() {
        let single = json!({"placeholderId": "w", "data": {"hourly": {}}});
        assert!(DataEvent::from_fallback(&single, "w").is_some());
        assert!(DataEvent::from_fallback(&single, "other").is_none());

        let array = json!([
            {"placeholderId": "a", "data": 1},
            {"placeholderId": "b", "data": 2}
        ]);
        assert_eq!(DataEvent::from_fallback(&array, "b").unwrap().data, json!(2));
        assert!(DataEvent::from_fallback(&json!(null), "a").is_none());
    }

    #[test]
    fn test_surf_report_payload_flattens_forecast() {
        let payload: SurfReportPayload = serde_json::from_value(json!({
            "primary": [{"timestamp": "2026-10-18T00:00:00Z", "waveHeight": 1.2}],
            "spotName": "Ocean Beach",
            "report": {"rating": 3, "summary": "Clean lines"}
        }))
        .unwrap();
        assert_eq!(payload.forecast.primary.len(), 1);
        assert_eq!(payload.spot_name.as_deref(), Some("Ocean Beach"));
        assert_eq!(payload.report.unwrap().rating, Some(3));
    }
}
