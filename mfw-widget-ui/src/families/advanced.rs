use super::decode;
use crate::controller::WidgetFamily;
use crate::error::WidgetError;
use crate::page::Container;
use crate::tree::{RenderTree, Renderer};
use mfw_data::compare::{compare_models, mean_absolute_difference};
use mfw_data::format::format_height;
use mfw_forecast::event::Family;
use mfw_forecast::forecast::ModelForecast;
use mfw_forecast::units::UnitPreferences;
use serde_json::{json, Value};

/// Side-by-side model comparison, drawn only for readers who enabled
/// advanced charts.
pub struct AdvancedFamily;

impl WidgetFamily for AdvancedFamily {
    fn family(&self) -> Family {
        Family::Advanced
    }

    fn loading_tree(&self, _container: &Container, prefs: &UnitPreferences) -> Option<RenderTree> {
        prefs
            .show_advanced_charts
            .then(|| RenderTree::loading("Loading model comparison..."))
    }

    fn handle_data(
        &self,
        _container: &Container,
        data: &Value,
        prefs: &UnitPreferences,
    ) -> Result<Option<RenderTree>, WidgetError> {
        if !prefs.show_advanced_charts {
            log::debug!("Advanced charts disabled, not rendering model comparison");
            return Ok(None);
        }
        let forecast: ModelForecast = decode(Family::Advanced, data)?;
        let rows = compare_models(&forecast, prefs);
        if rows.is_empty() {
            return Err(WidgetError::NoData { family: Family::Advanced });
        }
        let mean = mean_absolute_difference(&rows);
        let config = json!({
            "title": "Model Comparison",
            "unit": prefs.surf_height.suffix(),
            "meanAbsoluteDifference": mean,
            "meanDifferenceDisplay": mean.map(|m| format_height(m, prefs.surf_height)),
        });
        RenderTree::new(Renderer::ModelComparison, &rows, config).map(Some)
    }
}
