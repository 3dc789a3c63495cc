use super::decode;
use crate::controller::WidgetFamily;
use crate::error::WidgetError;
use crate::page::Container;
use crate::tree::{RenderTree, Renderer};
use mfw_data::chart::{normalize_chart_data, project, ChartType};
use mfw_data::format::format_temperature;
use mfw_data::weather::{daily_temperature_range, normalize_hourly_weather};
use mfw_forecast::event::{Family, WeatherPayload};
use mfw_forecast::forecast::offset_from_minutes;
use mfw_forecast::units::UnitPreferences;
use serde_json::{json, Value};

/// Hourly weather table with an optional marine wind strip from the
/// two-model forecast.
pub struct WeatherFamily;

impl WidgetFamily for WeatherFamily {
    fn family(&self) -> Family {
        Family::Weather
    }

    fn loading_tree(&self, _container: &Container, _prefs: &UnitPreferences) -> Option<RenderTree> {
        Some(RenderTree::loading("Loading weather..."))
    }

    fn handle_data(
        &self,
        _container: &Container,
        data: &Value,
        prefs: &UnitPreferences,
    ) -> Result<Option<RenderTree>, WidgetError> {
        let payload: WeatherPayload = decode(Family::Weather, data)?;
        let offset = offset_from_minutes(payload.utc_offset);
        let hours = normalize_hourly_weather(&payload.hourly, prefs, &offset);
        let marine = payload
            .forecast
            .as_ref()
            .map(|forecast| project(&normalize_chart_data(forecast, prefs), ChartType::Wind, prefs))
            .unwrap_or_default();
        if hours.is_empty() && marine.is_empty() {
            return Err(WidgetError::NoData { family: Family::Weather });
        }

        let days: Vec<Value> = daily_temperature_range(&hours)
            .into_iter()
            .map(|(day, min, max)| {
                let range = format!(
                    "{} / {}",
                    format_temperature(min, prefs.temperature),
                    format_temperature(max, prefs.temperature)
                );
                json!({ "day": day, "min": min, "max": max, "range": range })
            })
            .collect();
        let config = json!({
            "title": "Weather",
            "temperatureUnit": prefs.temperature.suffix(),
            "windUnit": prefs.wind_speed.suffix(),
        });
        RenderTree::new(
            Renderer::WeatherTable,
            &json!({ "hours": hours, "days": days, "marine": marine }),
            config,
        )
        .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::fixtures;
    use mfw_forecast::units::TemperatureUnit;

    fn hourly() -> Value {
        json!({
            "time": ["2026-10-18T00:00:00Z", "2026-10-18T01:00:00Z", "2026-10-18T02:00:00Z"],
            "temperature": [12.0, 14.0],
            "weatherCode": [0, 3, 95],
            "windSpeed": [5.0, 6.0, 7.0],
            "windDirection": [270.0, 270.0, 270.0]
        })
    }

    #[test]
    fn test_weather_rows_and_days() {
        let prefs = UnitPreferences {
            temperature: TemperatureUnit::Fahrenheit,
            ..UnitPreferences::default()
        };
        let tree = WeatherFamily
            .handle_data(&Container::new("w"), &json!({ "hourly": hourly() }), &prefs)
            .unwrap()
            .unwrap();
        assert_eq!(tree.renderer, Renderer::WeatherTable);
        assert_eq!(tree.config["temperatureUnit"], "°F");
        let hours = tree.data["hours"].as_array().unwrap();
        assert_eq!(hours.len(), 3);
        assert_eq!(hours[1]["temperature"], 57.2);
        assert!(hours[2]["temperature"].is_null());
        assert_eq!(hours[2]["icon"], "thunderstorm");
        assert_eq!(tree.data["days"][0]["min"], 53.6);
        assert_eq!(tree.data["days"][0]["range"], "54°F / 57°F");
        assert_eq!(hours[0]["temperatureDisplay"], "54°F");
        assert!(tree.data["marine"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_marine_strip_from_forecast() {
        let data = json!({ "hourly": {}, "forecast": fixtures::forecast() });
        let tree = WeatherFamily
            .handle_data(&Container::new("w"), &data, &UnitPreferences::default())
            .unwrap()
            .unwrap();
        assert!(tree.data["hours"].as_array().unwrap().is_empty());
        assert_eq!(tree.data["marine"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn test_nothing_to_show() {
        let err = WeatherFamily
            .handle_data(&Container::new("w"), &json!({ "hourly": {} }), &UnitPreferences::default())
            .unwrap_err();
        assert_eq!(err, WidgetError::NoData { family: Family::Weather });
    }
}
