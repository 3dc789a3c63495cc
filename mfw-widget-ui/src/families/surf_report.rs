use super::decode;
use crate::controller::WidgetFamily;
use crate::error::WidgetError;
use crate::page::Container;
use crate::tree::{RenderTree, Renderer};
use mfw_data::chart::normalize_chart_data;
use mfw_data::format::{clock_label, rating_label};
use mfw_data::report::summarize_days;
use mfw_forecast::event::{Family, SurfReportPayload};
use mfw_forecast::units::UnitPreferences;
use serde_json::{json, Value};

/// Spot report card: the written report plus one summary per forecast day.
pub struct SurfReportFamily;

impl WidgetFamily for SurfReportFamily {
    fn family(&self) -> Family {
        Family::SurfReport
    }

    fn loading_tree(&self, _container: &Container, _prefs: &UnitPreferences) -> Option<RenderTree> {
        Some(RenderTree::loading("Loading surf report..."))
    }

    fn handle_data(
        &self,
        _container: &Container,
        data: &Value,
        prefs: &UnitPreferences,
    ) -> Result<Option<RenderTree>, WidgetError> {
        let payload: SurfReportPayload = decode(Family::SurfReport, data)?;
        let offset = payload.forecast.offset();
        let datums = normalize_chart_data(&payload.forecast, prefs);
        let days = summarize_days(&datums, prefs, &offset);
        if days.is_empty() && payload.report.is_none() {
            return Err(WidgetError::NoData { family: Family::SurfReport });
        }

        let report = payload.report.map(|report| {
            json!({
                "rating": report.rating,
                "ratingLabel": report.rating.map(rating_label),
                "summary": report.summary,
                "updatedAt": report.updated_at.map(|t| clock_label(&t, &offset)),
            })
        });
        let data = json!({
            "spotName": payload.spot_name,
            "report": report,
            "days": days,
        });
        let config = json!({
            "title": "Surf Report",
            "unit": prefs.surf_height.suffix(),
            "windUnit": prefs.wind_speed.suffix(),
        });
        RenderTree::new(Renderer::SurfReport, &data, config).map(Some)
    }
}
