//! Subscription overlay widget
//!
//! Loaded after the forecast widgets and initialized once the browser is
//! idle. Shows the paywall overlay while `bigpipe:subscription-data`
//! reports the forecast as locked.

use mfw_widget_ui::bootstrap;
use mfw_widget_ui::families::SubscriptionFamily;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    if let Err(e) = bootstrap::launch(SubscriptionFamily) {
        log::error!("[MFW] subscription widget failed to start: {:#}", e);
    }
}
