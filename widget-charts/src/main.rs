//! Forecast charts widget
//!
//! Mounts into every `[data-component="charts"]` placeholder. Each container
//! picks its chart with `data-chart-type` (swell, wind, period or energy)
//! and re-renders whenever a `bigpipe:charts-data` event names it.

use mfw_widget_ui::bootstrap;
use mfw_widget_ui::families::ChartsFamily;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    if let Err(e) = bootstrap::launch(ChartsFamily) {
        log::error!("[MFW] charts widget failed to start: {:#}", e);
    }
}
