//! Model comparison widget, initialized at idle time and only drawn for
//! readers with `showAdvancedCharts` enabled.

use mfw_widget_ui::bootstrap;
use mfw_widget_ui::families::AdvancedFamily;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    if let Err(e) = bootstrap::launch(AdvancedFamily) {
        log::error!("[MFW] advanced widget failed to start: {:#}", e);
    }
}
