//! Surf report widget: the spot's written report plus daily summaries.

use mfw_widget_ui::bootstrap;
use mfw_widget_ui::families::SurfReportFamily;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    if let Err(e) = bootstrap::launch(SurfReportFamily) {
        log::error!("[MFW] surf report widget failed to start: {:#}", e);
    }
}
