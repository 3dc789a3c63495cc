use super::decode;
use crate::controller::WidgetFamily;
use crate::error::WidgetError;
use crate::page::Container;
use crate::tree::{RenderTree, Renderer};
use mfw_data::chart::{max_value, normalize_chart_data, project, ChartType};
use mfw_forecast::event::Family;
use mfw_forecast::forecast::ModelForecast;
use mfw_forecast::units::UnitPreferences;
use serde_json::{json, Value};

/// Swell, wind, period and energy charts. The chart drawn in a container is
/// chosen by its `data-chart-type` (swell when absent).
pub struct ChartsFamily;

fn unit_for(chart_type: ChartType, prefs: &UnitPreferences) -> &'static str {
    match chart_type {
        ChartType::Swell => prefs.surf_height.suffix(),
        ChartType::Wind => prefs.wind_speed.suffix(),
        ChartType::Period => "s",
        ChartType::Energy => "kJ",
    }
}

impl WidgetFamily for ChartsFamily {
    fn family(&self) -> Family {
        Family::Charts
    }

    fn loading_tree(&self, container: &Container, _prefs: &UnitPreferences) -> Option<RenderTree> {
        let title = container
            .chart_type
            .as_deref()
            .and_then(|t| t.parse::<ChartType>().ok())
            .unwrap_or_default()
            .title();
        Some(RenderTree::loading(&format!("Loading {}...", title.to_lowercase())))
    }

    fn handle_data(
        &self,
        container: &Container,
        data: &Value,
        prefs: &UnitPreferences,
    ) -> Result<Option<RenderTree>, WidgetError> {
        let chart_type = container
            .chart_type
            .as_deref()
            .map(str::parse::<ChartType>)
            .transpose()?
            .unwrap_or_default();

        let forecast: ModelForecast = decode(Family::Charts, data)?;
        let datums = normalize_chart_data(&forecast, prefs);
        let points = project(&datums, chart_type, prefs);
        if points.is_empty() {
            return Err(WidgetError::NoData { family: Family::Charts });
        }

        let config = json!({
            "title": chart_type.title(),
            "chartType": chart_type,
            "unit": unit_for(chart_type, prefs),
            "yMax": max_value(&points),
            "showModelSource": prefs.show_advanced_charts,
        });
        RenderTree::new(Renderer::ForecastChart, &points, config).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::fixtures;
    use mfw_forecast::units::SurfHeightUnit;

    #[test]
    fn test_swell_chart_by_default() {
        let container = Container::new("c1").with_component_type("charts");
        let tree = ChartsFamily
            .handle_data(&container, &fixtures::forecast(), &UnitPreferences::default())
            .unwrap()
            .unwrap();
        assert_eq!(tree.renderer, Renderer::ForecastChart);
        assert_eq!(tree.config["chartType"], "swell");
        assert_eq!(tree.config["unit"], "m");
        let points = tree.data.as_array().unwrap();
        assert_eq!(points.len(), 8);
        assert_eq!(points[0]["value"], 1.5);
        assert_eq!(points[0]["model"], "secondary");
        assert_eq!(points[7]["value"], 1.0);
        assert_eq!(points[7]["model"], "primary");
        assert_eq!(tree.config["yMax"], 1.9);
    }

    #[test]
    fn test_wind_chart_in_feet_prefs() {
        let container = Container::new("c2").with_component_type("charts").with_chart_type("wind");
        let prefs = UnitPreferences {
            surf_height: SurfHeightUnit::Feet,
            ..UnitPreferences::default()
        };
        let tree = ChartsFamily
            .handle_data(&container, &fixtures::forecast(), &prefs)
            .unwrap()
            .unwrap();
        assert_eq!(tree.config["unit"], "kts");
        assert_eq!(tree.data[0]["value"], 6.0);
        assert_eq!(tree.data[0]["compass"], "NE");
        assert!(tree.data[0]["color"].as_str().unwrap().starts_with('#'));
    }

    #[test]
    fn test_unknown_chart_type() {
        let container = Container::new("c3").with_chart_type("tsunami");
        let err = ChartsFamily
            .handle_data(&container, &fixtures::forecast(), &UnitPreferences::default())
            .unwrap_err();
        assert_eq!(err, WidgetError::UnknownChartType("tsunami".to_string()));
    }

    #[test]
    fn test_invalid_and_empty_payloads() {
        let container = Container::new("c4");
        let prefs = UnitPreferences::default();
        assert!(matches!(
            ChartsFamily.handle_data(&container, &json!({"primary": "nope"}), &prefs),
            Err(WidgetError::InvalidPayload { .. })
        ));
        assert_eq!(
            ChartsFamily.handle_data(&container, &json!({"primary": [null]}), &prefs),
            Err(WidgetError::NoData { family: Family::Charts })
        );
    }

    #[test]
    fn test_loading_tree_names_chart() {
        let container = Container::new("c5").with_chart_type("period");
        let tree = ChartsFamily
            .loading_tree(&container, &UnitPreferences::default())
            .unwrap();
        assert_eq!(tree.config["message"], "Loading swell period...");
    }
}
