//! The host page as seen by a controller.
//!
//! A [`Page`] answers three questions: which containers exist, how to
//! render into one, and how to hear about data events. The browser
//! implementation lives in [`crate::dom`]; tests use an in-memory page.

use crate::registry::RenderRoot;
use mfw_forecast::event::DataEvent;
use serde_json::Value;
use std::rc::Rc;

pub const PLACEHOLDER_ATTR: &str = "data-placeholder";
pub const COMPONENT_ATTR: &str = "data-component";
pub const CHART_TYPE_ATTR: &str = "data-chart-type";

/// Snapshot of a placeholder element reserved by the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// `data-placeholder`, or the element id when the attribute is absent.
    pub placeholder_id: String,
    /// DOM id renderers draw into.
    pub dom_id: String,
    /// `data-component`
    pub component_type: Option<String>,
    /// `data-chart-type`
    pub chart_type: Option<String>,
}

impl Container {
    pub fn new(placeholder_id: impl Into<String>) -> Self {
        let placeholder_id = placeholder_id.into();
        Self {
            dom_id: dom_id_for(&placeholder_id),
            placeholder_id,
            component_type: None,
            chart_type: None,
        }
    }

    pub fn with_component_type(mut self, component_type: impl Into<String>) -> Self {
        self.component_type = Some(component_type.into());
        self
    }

    pub fn with_chart_type(mut self, chart_type: impl Into<String>) -> Self {
        self.chart_type = Some(chart_type.into());
        self
    }
}

/// DOM id assigned to placeholders that do not carry one.
pub fn dom_id_for(placeholder_id: &str) -> String {
    let safe: String = placeholder_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    format!("mfw-{}", safe)
}

/// Callback receiving decoded data events.
pub type EventSink = Rc<dyn Fn(DataEvent)>;

pub trait Page {
    type Root: RenderRoot;
    /// Keeps an event subscription alive; dropping it unsubscribes.
    type Listener;

    /// All containers matching a CSS selector, in document order.
    fn containers(&self, selector: &str) -> Vec<Container>;

    /// The container for a placeholder id, if the page has one.
    fn find_placeholder(&self, placeholder_id: &str) -> Option<Container>;

    fn create_root(&self, container: &Container) -> Self::Root;

    /// Subscribe `sink` to a named event. `None` if the page cannot listen.
    fn listen(&self, event_name: &str, sink: EventSink) -> Option<Self::Listener>;

    /// A host global at `path` (e.g. `["__INITIAL_STATE__", "user"]`) as JSON.
    fn global(&self, path: &[&str]) -> Option<Value>;
}
