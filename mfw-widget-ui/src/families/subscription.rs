use super::decode;
use crate::controller::WidgetFamily;
use crate::error::WidgetError;
use crate::page::Container;
use crate::tree::{RenderTree, Renderer};
use mfw_forecast::event::{Family, SubscriptionPayload};
use mfw_forecast::units::UnitPreferences;
use serde_json::{json, Value};

const DEFAULT_MESSAGE: &str = "Upgrade to unlock the full forecast";

/// Paywall overlay. Shown only while the host reports the forecast as
/// locked; an unlocked payload removes it.
pub struct SubscriptionFamily;

impl WidgetFamily for SubscriptionFamily {
    fn family(&self) -> Family {
        Family::Subscription
    }

    fn loading_tree(&self, _container: &Container, _prefs: &UnitPreferences) -> Option<RenderTree> {
        None
    }

    fn handle_data(
        &self,
        _container: &Container,
        data: &Value,
        _prefs: &UnitPreferences,
    ) -> Result<Option<RenderTree>, WidgetError> {
        let payload: SubscriptionPayload = decode(Family::Subscription, data)?;
        if !payload.locked {
            return Ok(None);
        }
        let data = json!({
            "plan": payload.plan,
            "message": payload.message.as_deref().unwrap_or(DEFAULT_MESSAGE),
            "ctaUrl": payload.cta_url,
        });
        RenderTree::new(Renderer::SubscriptionOverlay, &data, json!({})).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::testing::FakePage;
    use crate::controller::Controller;
    use mfw_forecast::event::DataEvent;

    #[test]
    fn test_locked_shows_overlay() {
        let data = json!({"locked": true, "plan": "premium", "ctaUrl": "/upgrade"});
        let tree = SubscriptionFamily
            .handle_data(&Container::new("s"), &data, &UnitPreferences::default())
            .unwrap()
            .unwrap();
        assert_eq!(tree.renderer, Renderer::SubscriptionOverlay);
        assert_eq!(tree.data["message"], DEFAULT_MESSAGE);
        assert_eq!(tree.data["ctaUrl"], "/upgrade");
    }

    #[test]
    fn test_unlocked_hides_overlay() {
        let tree = SubscriptionFamily
            .handle_data(&Container::new("s"), &json!({"locked": false}), &UnitPreferences::default())
            .unwrap();
        assert!(tree.is_none());
    }

    #[test]
    fn test_no_loading_state() {
        assert!(SubscriptionFamily
            .loading_tree(&Container::new("s"), &UnitPreferences::default())
            .is_none());
    }

    #[test]
    fn test_bad_payload() {
        let err = SubscriptionFamily
            .handle_data(&Container::new("s"), &json!({"locked": "yes"}), &UnitPreferences::default())
            .unwrap_err();
        assert!(matches!(err, WidgetError::InvalidPayload { .. }));
    }

    #[test]
    fn test_overlay_mounts_only_when_locked() {
        let page = FakePage::default();
        page.dom.add(Container::new("s").with_component_type("subscription"));
        let dom = page.dom.clone();
        let controller = Controller::new(SubscriptionFamily, page);
        let event = Family::Subscription.event_name();

        controller.initialize();
        assert!(controller.is_initialized());
        assert!(controller.mounted_ids().is_empty());
        assert!(dom.renders.borrow().is_empty());

        dom.dispatch(&event, DataEvent::new("s", json!({"locked": true})));
        assert_eq!(controller.mounted_ids(), vec!["s"]);
        let renders = dom.renders_for("s");
        assert_eq!(renders.len(), 1);
        assert_eq!(renders[0].renderer, Renderer::SubscriptionOverlay);

        dom.dispatch(&event, DataEvent::new("s", json!({"locked": false})));
        assert!(controller.mounted_ids().is_empty());
        assert_eq!(*dom.unmounts.borrow(), vec!["s".to_string()]);
    }
}
