use super::decode;
use crate::controller::WidgetFamily;
use crate::error::WidgetError;
use crate::page::Container;
use crate::tree::{RenderTree, Renderer};
use mfw_data::format::{clock_label, format_height};
use mfw_data::tides::{extremes, is_rising, normalize_tides, tide_height_at};
use mfw_forecast::event::{Family, TidesPayload};
use mfw_forecast::forecast::offset_from_minutes;
use mfw_forecast::units::UnitPreferences;
use serde_json::{json, Value};

pub struct TidesFamily;

impl WidgetFamily for TidesFamily {
    fn family(&self) -> Family {
        Family::Tides
    }

    fn loading_tree(&self, _container: &Container, _prefs: &UnitPreferences) -> Option<RenderTree> {
        Some(RenderTree::loading("Loading tides..."))
    }

    fn handle_data(
        &self,
        _container: &Container,
        data: &Value,
        prefs: &UnitPreferences,
    ) -> Result<Option<RenderTree>, WidgetError> {
        let payload: TidesPayload = decode(Family::Tides, data)?;
        let offset = offset_from_minutes(payload.utc_offset);
        let points = normalize_tides(&payload.tides, prefs, &offset);
        if points.is_empty() {
            return Err(WidgetError::NoData { family: Family::Tides });
        }

        let now = payload.now.and_then(|now| {
            let height = tide_height_at(&points, now)?;
            Some(json!({
                "time": now,
                "label": clock_label(&now, &offset),
                "height": height,
                "display": format_height(height, prefs.surf_height),
                "rising": is_rising(&points, now),
            }))
        });
        let config = json!({
            "title": "Tides",
            "unit": prefs.surf_height.suffix(),
        });
        RenderTree::new(
            Renderer::TideChart,
            &json!({ "points": points, "extremes": extremes(&points), "now": now }),
            config,
        )
        .map(Some)
    }
}
