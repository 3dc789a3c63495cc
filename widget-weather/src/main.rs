//! Hourly weather widget for `bigpipe:weather-data`.

use mfw_widget_ui::bootstrap;
use mfw_widget_ui::families::WeatherFamily;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    if let Err(e) = bootstrap::launch(WeatherFamily) {
        log::error!("[MFW] weather widget failed to start: {:#}", e);
    }
}
