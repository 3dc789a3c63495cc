//! Browser [`Page`] on top of `web-sys`.

use crate::js_bridge;
use crate::page::{dom_id_for, Container, EventSink, Page, CHART_TYPE_ATTR, COMPONENT_ATTR, PLACEHOLDER_ATTR};
use crate::registry::RenderRoot;
use crate::tree::RenderTree;
use anyhow::anyhow;
use mfw_forecast::event::DataEvent;
use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, Document, Element, Event, Window};

/// The live document and window.
pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    pub fn new() -> anyhow::Result<Self> {
        let window = web_sys::window().ok_or_else(|| anyhow!("no global window"))?;
        let document = window.document().ok_or_else(|| anyhow!("window has no document"))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn placeholder_element(&self, placeholder_id: &str) -> Option<Element> {
        let selector = attr_selector(PLACEHOLDER_ATTR, placeholder_id);
        match self.document.query_selector(&selector) {
            Ok(Some(element)) => Some(element),
            Ok(None) => self.document.get_element_by_id(placeholder_id),
            Err(e) => {
                log::warn!("Invalid placeholder selector {}: {:?}", selector, e);
                self.document.get_element_by_id(placeholder_id)
            }
        }
    }
}

/// `[attr="value"]` with the value escaped for a quoted CSS string.
pub fn attr_selector(attr: &str, value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("[{}=\"{}\"]", attr, escaped)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn container_from(element: &Element) -> Option<Container> {
    let id = non_empty(Some(element.id()));
    let placeholder_id = non_empty(element.get_attribute(PLACEHOLDER_ATTR)).or_else(|| id.clone())?;
    Some(Container {
        dom_id: id.unwrap_or_else(|| dom_id_for(&placeholder_id)),
        placeholder_id,
        component_type: non_empty(element.get_attribute(COMPONENT_ATTR)),
        chart_type: non_empty(element.get_attribute(CHART_TYPE_ATTR)),
    })
}

/// Render root for one container, drawing through the D3.js renderers.
#[derive(Debug)]
pub struct ChartRoot {
    dom_id: String,
}

impl RenderRoot for ChartRoot {
    fn render(&mut self, tree: &RenderTree) {
        js_bridge::render_widget(&self.dom_id, tree);
    }

    fn unmount(&mut self) {
        js_bridge::destroy_widget(&self.dom_id);
    }
}

/// A window event listener, removed when dropped.
pub struct DomListener {
    target: Window,
    event_name: String,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for DomListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(&self.event_name, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to remove {} listener: {:?}", self.event_name, e);
        }
    }
}

impl Page for WebPage {
    type Root = ChartRoot;
    type Listener = DomListener;

    fn containers(&self, selector: &str) -> Vec<Container> {
        let nodes = match self.document.query_selector_all(selector) {
            Ok(nodes) => nodes,
            Err(e) => {
                log::warn!("Invalid container selector {}: {:?}", selector, e);
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter_map(|element| {
                let container = container_from(&element);
                if container.is_none() {
                    log::warn!("Skipping container without id or {}", PLACEHOLDER_ATTR);
                }
                container
            })
            .collect()
    }

    fn find_placeholder(&self, placeholder_id: &str) -> Option<Container> {
        self.placeholder_element(placeholder_id)
            .and_then(|element| container_from(&element))
    }

    fn create_root(&self, container: &Container) -> ChartRoot {
        if let Some(element) = self.placeholder_element(&container.placeholder_id) {
            if element.id().is_empty() {
                element.set_id(&container.dom_id);
            }
        }
        ChartRoot {
            dom_id: container.dom_id.clone(),
        }
    }

    fn listen(&self, event_name: &str, sink: EventSink) -> Option<DomListener> {
        let name = event_name.to_string();
        let closure = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |event: Event| {
            let Some(custom) = event.dyn_ref::<CustomEvent>() else {
                log::warn!("{} was not a CustomEvent", name);
                return;
            };
            match serde_wasm_bindgen::from_value::<DataEvent>(custom.detail()) {
                Ok(data_event) => sink(data_event),
                Err(e) => log::warn!("Malformed {} detail: {}", name, e),
            }
        }));
        if let Err(e) = self
            .window
            .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
        {
            log::error!("Failed to listen for {}: {:?}", event_name, e);
            return None;
        }
        Some(DomListener {
            target: self.window.clone(),
            event_name: event_name.to_string(),
            closure,
        })
    }

    fn global(&self, path: &[&str]) -> Option<Value> {
        let mut current: JsValue = self.window.clone().into();
        for key in path {
            if current.is_null() || current.is_undefined() {
                return None;
            }
            current = js_sys::Reflect::get(&current, &JsValue::from_str(key)).ok()?;
        }
        if current.is_null() || current.is_undefined() {
            return None;
        }
        match serde_wasm_bindgen::from_value(current) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Could not read window.{}: {}", path.join("."), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_selector_escapes_quotes() {
        assert_eq!(attr_selector("data-placeholder", "p1"), r#"[data-placeholder="p1"]"#);
        assert_eq!(
            attr_selector("data-placeholder", r#"a"b\c"#),
            r#"[data-placeholder="a\"b\\c"]"#
        );
    }
}
