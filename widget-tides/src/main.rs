//! Tide chart widget
//!
//! Draws the tide curve for `[data-component="tides"]` placeholders, with
//! high and low water marked and a marker at the host's current time.

use mfw_widget_ui::bootstrap;
use mfw_widget_ui::families::TidesFamily;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    if let Err(e) = bootstrap::launch(TidesFamily) {
        log::error!("[MFW] tides widget failed to start: {:#}", e);
    }
}
