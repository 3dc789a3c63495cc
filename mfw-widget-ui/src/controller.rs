//! Entry controller shared by every widget family.
//!
//! A [`Controller`] composes a family strategy ([`WidgetFamily`]) with a
//! [`Page`]. It discovers the family's containers, listens for the family's
//! data events, and keeps a [`MountRegistry`] so each container is mounted
//! once and re-rendered in place as newer data arrives.
//!
//! State lives behind `Rc<RefCell<..>>` on the single UI thread. Event
//! listeners only hold `Weak` references, so dropping every controller
//! handle silences them. Events that arrive while the controller is busy
//! (a renderer dispatching synchronously, say) wait in a queue and are
//! handled in dispatch order as soon as the current operation returns.

use crate::error::WidgetError;
use crate::page::{Container, EventSink, Page};
use crate::registry::MountRegistry;
use crate::tree::RenderTree;
use mfw_forecast::event::{DataEvent, Family};
use mfw_forecast::settings::{resolve_unit_preferences, SETTINGS_SOURCE_PATHS};
use mfw_forecast::units::UnitPreferences;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Family-specific strategy plugged into the shared [`Controller`].
pub trait WidgetFamily {
    fn family(&self) -> Family;

    /// Events to listen for.
    fn event_names(&self) -> Vec<String> {
        vec![self.family().event_name()]
    }

    /// Selector for containers already in the document at initialization.
    fn container_selector(&self) -> String {
        self.family().container_selector()
    }

    /// Window global holding first-paint data.
    fn fallback_global(&self) -> &'static str {
        self.family().fallback_global()
    }

    /// Whether an event found a container this family should render.
    ///
    /// The container must not belong to another family, and an event
    /// component type, when given, must name the container's component or
    /// chart type.
    fn accepts(&self, container: &Container, event: &DataEvent) -> bool {
        let family = self.family().name();
        if container
            .component_type
            .as_deref()
            .is_some_and(|component| component != family)
        {
            return false;
        }
        match event.component_type.as_deref() {
            None => true,
            Some(wanted) => {
                wanted == family
                    || container.component_type.as_deref() == Some(wanted)
                    || container.chart_type.as_deref() == Some(wanted)
            }
        }
    }

    /// Tree shown in a container before any data arrives; `None` leaves the
    /// container unmounted.
    fn loading_tree(&self, _container: &Container, _prefs: &UnitPreferences) -> Option<RenderTree> {
        Some(RenderTree::loading("Loading forecast..."))
    }

    /// Turn a payload into a tree. `Ok(None)` means the widget should show
    /// nothing (and is unmounted if it was showing something).
    fn handle_data(
        &self,
        container: &Container,
        data: &Value,
        prefs: &UnitPreferences,
    ) -> Result<Option<RenderTree>, WidgetError>;
}

struct Inner<F: WidgetFamily, P: Page> {
    family: F,
    page: P,
    registry: MountRegistry<P::Root>,
    listeners: Vec<P::Listener>,
    /// Events heard through early listeners, replayed by `initialize`.
    held: Vec<DataEvent>,
    prefs: UnitPreferences,
    initialized: bool,
}

type Queue = RefCell<VecDeque<DataEvent>>;

/// Bootstraps one widget family on one page.
pub struct Controller<F: WidgetFamily, P: Page> {
    inner: Rc<RefCell<Inner<F, P>>>,
    queue: Rc<Queue>,
}

impl<F: WidgetFamily, P: Page> Clone for Controller<F, P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            queue: self.queue.clone(),
        }
    }
}

impl<F: WidgetFamily + 'static, P: Page + 'static> Controller<F, P> {
    pub fn new(family: F, page: P) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                family,
                page,
                registry: MountRegistry::new(),
                listeners: Vec::new(),
                held: Vec::new(),
                prefs: UnitPreferences::default(),
                initialized: false,
            })),
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Register listeners ahead of a deferred [`initialize`](Self::initialize).
    ///
    /// Events heard before then are held and replayed, in order, once the
    /// existing containers are mounted.
    pub fn listen_early(&self) {
        let Ok(mut inner) = self.inner.try_borrow_mut() else {
            log::warn!("[MFW] listen_early called re-entrantly; ignoring");
            return;
        };
        if inner.initialized || !inner.listeners.is_empty() {
            return;
        }
        inner.register_listeners(self.sink());
    }

    /// Register listeners and mount every container already in the page.
    ///
    /// Only the first call takes effect until [`destroy`](Self::destroy).
    pub fn initialize(&self) {
        let held = {
            let Ok(mut inner) = self.inner.try_borrow_mut() else {
                log::warn!("[MFW] initialize called re-entrantly; ignoring");
                return;
            };
            if inner.initialized {
                log::debug!("[MFW] {} already initialized", inner.family.family().name());
                return;
            }
            inner.initialized = true;

            let sources: Vec<Value> = SETTINGS_SOURCE_PATHS
                .iter()
                .filter_map(|path| inner.page.global(path))
                .collect();
            inner.prefs = resolve_unit_preferences(&sources);

            if inner.listeners.is_empty() {
                inner.register_listeners(self.sink());
            }

            inner.mount_existing();
            log::info!(
                "[MFW] {} initialized with {} container(s)",
                inner.family.family().name(),
                inner.registry.len()
            );
            std::mem::take(&mut inner.held)
        };
        {
            let mut queue = self.queue.borrow_mut();
            for event in held.into_iter().rev() {
                queue.push_front(event);
            }
        }
        self.drain();
    }

    /// Handle one data event. Events for unknown containers or with empty
    /// payloads are logged and dropped.
    pub fn handle_data_event(&self, event: DataEvent) {
        self.queue.borrow_mut().push_back(event);
        self.drain();
    }

    /// Unmount everything, stop listening and allow a later `initialize`.
    pub fn destroy(&self) {
        {
            let Ok(mut inner) = self.inner.try_borrow_mut() else {
                log::warn!("[MFW] destroy called re-entrantly; ignoring");
                return;
            };
            let unmounted = inner.registry.unmount_all();
            inner.listeners.clear();
            inner.held.clear();
            inner.initialized = false;
            log::info!(
                "[MFW] {} destroyed, {} widget(s) unmounted",
                inner.family.family().name(),
                unmounted
            );
        }
        self.queue.borrow_mut().clear();
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.borrow().initialized
    }

    pub fn mounted_ids(&self) -> Vec<String> {
        self.inner.borrow().registry.ids()
    }

    pub fn current_tree(&self, container_id: &str) -> Option<RenderTree> {
        self.inner.borrow().registry.current_tree(container_id).cloned()
    }

    pub fn preferences(&self) -> UnitPreferences {
        self.inner.borrow().prefs
    }

    fn sink(&self) -> EventSink {
        let inner = Rc::downgrade(&self.inner);
        let queue = Rc::downgrade(&self.queue);
        Rc::new(move |event: DataEvent| {
            let (Some(inner), Some(queue)) = (inner.upgrade(), queue.upgrade()) else {
                return;
            };
            queue.borrow_mut().push_back(event);
            Self::drain_with(&inner, &queue);
        })
    }

    fn drain(&self) {
        Self::drain_with(&self.inner, &self.queue);
    }

    fn drain_with(inner: &RefCell<Inner<F, P>>, queue: &Queue) {
        loop {
            // Busy: whoever holds the borrow drains when it finishes.
            let Ok(mut guard) = inner.try_borrow_mut() else {
                return;
            };
            let next = queue.borrow_mut().pop_front();
            let Some(event) = next else {
                return;
            };
            guard.handle_data_event(event);
        }
    }
}

impl<F: WidgetFamily, P: Page> Inner<F, P> {
    fn register_listeners(&mut self, sink: EventSink) {
        for name in self.family.event_names() {
            match self.page.listen(&name, sink.clone()) {
                Some(listener) => self.listeners.push(listener),
                None => log::warn!("[MFW] could not listen for {}", name),
            }
        }
    }

    fn mount_existing(&mut self) {
        let global = self.page.global(&[self.family.fallback_global()]);
        for container in self.page.containers(&self.family.container_selector()) {
            if self.registry.contains(&container.placeholder_id) {
                continue;
            }
            let fallback = global
                .as_ref()
                .and_then(|g| DataEvent::from_fallback(g, &container.placeholder_id))
                .filter(|event| !event.has_empty_data())
                .filter(|event| {
                    let accepted = self.family.accepts(&container, event);
                    if !accepted {
                        log::warn!(
                            "[MFW] fallback data for {} is for {:?}; ignored",
                            container.placeholder_id,
                            event.component_type.as_deref().unwrap_or_default()
                        );
                    }
                    accepted
                });

            let tree = match fallback {
                Some(event) => match self.family.handle_data(&container, &event.data, &self.prefs) {
                    Ok(tree) => tree,
                    Err(e) => {
                        log::warn!("[MFW] fallback data for {}: {}", container.placeholder_id, e);
                        self.family.loading_tree(&container, &self.prefs)
                    }
                },
                None => self.family.loading_tree(&container, &self.prefs),
            };

            if let Some(tree) = tree {
                let root = self.page.create_root(&container);
                self.registry.mount(&container.placeholder_id, root, tree);
            }
        }
    }

    fn handle_data_event(&mut self, event: DataEvent) {
        let family = self.family.family().name();
        if !self.initialized && !self.listeners.is_empty() {
            log::debug!("[MFW] {}: holding event for {} until initialize", family, event.placeholder_id);
            self.held.push(event);
            return;
        }
        if !self.initialized {
            log::warn!(
                "[MFW] {}: event for {} before initialize; dropped",
                family,
                event.placeholder_id
            );
            return;
        }
        let Some(container) = self.page.find_placeholder(&event.placeholder_id) else {
            log::warn!(
                "[MFW] {}: no container for placeholder {}; event dropped",
                family,
                event.placeholder_id
            );
            return;
        };
        if !self.family.accepts(&container, &event) {
            log::warn!(
                "[MFW] {}: placeholder {} is not a {:?} container; event dropped",
                family,
                event.placeholder_id,
                event.component_type.as_deref().unwrap_or(family)
            );
            return;
        }
        if event.has_empty_data() {
            log::warn!("[MFW] {}: empty payload for {}; skipped", family, event.placeholder_id);
            return;
        }

        match self.family.handle_data(&container, &event.data, &self.prefs) {
            Ok(Some(tree)) => self.show(&container, tree),
            Ok(None) => {
                if self.registry.unmount(&container.placeholder_id) {
                    log::info!("[MFW] {}: {} hidden", family, container.placeholder_id);
                }
            }
            Err(e) => log::warn!("[MFW] {}: {}: {}", family, event.placeholder_id, e),
        }
    }

    fn show(&mut self, container: &Container, tree: RenderTree) {
        let id = &container.placeholder_id;
        if self.registry.contains(id) {
            self.registry.rerender(id, tree);
        } else {
            let root = self.page.create_root(container);
            self.registry.mount(id, root, tree);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{Dom, FakePage};
    use super::*;
    use crate::tree::Renderer;
    use mfw_forecast::units::SurfHeightUnit;
    use serde_json::json;

    /// Renders whatever it is given; hides on `{"hide": true}`.
    struct EchoFamily;

    impl WidgetFamily for EchoFamily {
        fn family(&self) -> Family {
            Family::Charts
        }

        fn handle_data(
            &self,
            _container: &Container,
            data: &Value,
            _prefs: &UnitPreferences,
        ) -> Result<Option<RenderTree>, WidgetError> {
            if data.get("hide").is_some() {
                return Ok(None);
            }
            if data.get("bad").is_some() {
                return Err(WidgetError::NoData { family: Family::Charts });
            }
            RenderTree::new(Renderer::ForecastChart, data, json!({})).map(Some)
        }
    }

    const EVENT: &str = "bigpipe:charts-data";

    fn setup(ids: &[&str]) -> (Controller<EchoFamily, FakePage>, Rc<Dom>) {
        let page = FakePage::default();
        for id in ids {
            page.dom.add(Container::new(*id).with_component_type("charts"));
        }
        let dom = page.dom.clone();
        (Controller::new(EchoFamily, page), dom)
    }

    #[test]
    fn test_initialize_mounts_existing_once() {
        let (controller, dom) = setup(&["a", "b"]);
        controller.initialize();
        controller.initialize();

        assert!(controller.is_initialized());
        assert_eq!(controller.mounted_ids(), vec!["a", "b"]);
        assert_eq!(dom.renders_for("a").len(), 1);
        assert_eq!(dom.renders_for("b").len(), 1);
        assert!(dom.renders_for("a")[0].is_loading());
        assert_eq!(dom.listener_count(EVENT), 1);
    }

    #[test]
    fn test_initialize_ignores_other_families_and_duplicates() {
        let (controller, dom) = setup(&["a", "a"]);
        dom.add(Container::new("w").with_component_type("weather"));
        controller.initialize();
        assert_eq!(controller.mounted_ids(), vec!["a"]);
        assert_eq!(dom.renders.borrow().len(), 1);
    }

    #[test]
    fn test_fallback_global_used_for_first_paint() {
        let (controller, dom) = setup(&["a", "b"]);
        dom.set_global(
            "__MFW_CHARTS_DATA__",
            json!({"a": {"placeholderId": "a", "data": {"v": 1}}}),
        );
        controller.initialize();
        assert_eq!(controller.current_tree("a").unwrap().data, json!({"v": 1}));
        assert!(controller.current_tree("b").unwrap().is_loading());
    }

    #[test]
    fn test_fallback_for_other_component_is_ignored() {
        let (controller, dom) = setup(&["a", "b"]);
        dom.set_global(
            "__MFW_CHARTS_DATA__",
            json!({
                "a": {"placeholderId": "a", "componentType": "tides", "data": {"v": 1}},
                "b": {"placeholderId": "b", "componentType": "charts", "data": {"v": 2}}
            }),
        );
        controller.initialize();
        assert!(controller.current_tree("a").unwrap().is_loading());
        assert_eq!(controller.current_tree("b").unwrap().data, json!({"v": 2}));
    }

    #[test]
    fn test_last_event_wins() {
        let (controller, dom) = setup(&["a"]);
        controller.initialize();
        for v in 1..=3 {
            dom.dispatch(EVENT, DataEvent::new("a", json!({ "v": v })));
        }
        assert_eq!(controller.current_tree("a").unwrap().data, json!({"v": 3}));
        // loading + three data renders, same root
        assert_eq!(dom.renders_for("a").len(), 4);
        assert_eq!(controller.mounted_ids().len(), 1);
    }

    #[test]
    fn test_event_for_missing_placeholder_is_dropped() {
        let (controller, dom) = setup(&["a"]);
        controller.initialize();
        dom.dispatch(EVENT, DataEvent::new("nope", json!({"v": 1})));
        controller.handle_data_event(DataEvent::new("nope", json!({"v": 1})));
        assert_eq!(controller.mounted_ids(), vec!["a"]);
        assert_eq!(dom.renders.borrow().len(), 1);
    }

    #[test]
    fn test_empty_payload_and_wrong_component_are_skipped() {
        let (controller, dom) = setup(&["a"]);
        dom.add(Container::new("w").with_component_type("weather"));
        controller.initialize();
        dom.dispatch(EVENT, DataEvent::new("a", json!({})));
        dom.dispatch(EVENT, DataEvent::new("a", Value::Null));
        dom.dispatch(EVENT, DataEvent::new("w", json!({"v": 1})));
        dom.dispatch(
            EVENT,
            DataEvent::new("a", json!({"v": 1})).with_component_type("tides"),
        );
        assert!(controller.current_tree("a").unwrap().is_loading());
        assert_eq!(controller.mounted_ids(), vec!["a"]);
    }

    #[test]
    fn test_event_mounts_container_added_after_initialize() {
        let (controller, dom) = setup(&[]);
        controller.initialize();
        dom.add(Container::new("late").with_component_type("charts"));
        dom.dispatch(EVENT, DataEvent::new("late", json!({"v": 7})));
        assert_eq!(controller.current_tree("late").unwrap().data, json!({"v": 7}));
    }

    #[test]
    fn test_family_errors_keep_previous_render() {
        let (controller, dom) = setup(&["a"]);
        controller.initialize();
        dom.dispatch(EVENT, DataEvent::new("a", json!({"v": 1})));
        dom.dispatch(EVENT, DataEvent::new("a", json!({"bad": true})));
        assert_eq!(controller.current_tree("a").unwrap().data, json!({"v": 1}));
    }

    #[test]
    fn test_hidden_result_unmounts() {
        let (controller, dom) = setup(&["a"]);
        controller.initialize();
        dom.dispatch(EVENT, DataEvent::new("a", json!({"hide": true})));
        assert!(controller.mounted_ids().is_empty());
        assert_eq!(*dom.unmounts.borrow(), vec!["a"]);
    }

    #[test]
    fn test_destroy_then_initialize_remounts() {
        let (controller, dom) = setup(&["a", "b"]);
        controller.initialize();
        controller.destroy();

        assert!(!controller.is_initialized());
        assert!(controller.mounted_ids().is_empty());
        assert_eq!(dom.unmounts.borrow().len(), 2);
        assert_eq!(dom.listener_count(EVENT), 0);

        // No longer listening
        dom.dispatch(EVENT, DataEvent::new("a", json!({"v": 1})));
        assert!(controller.mounted_ids().is_empty());

        dom.add(Container::new("c").with_component_type("charts"));
        controller.initialize();
        assert_eq!(controller.mounted_ids(), vec!["a", "b", "c"]);
        assert_eq!(dom.listener_count(EVENT), 1);
    }

    #[test]
    fn test_direct_event_before_initialize_is_dropped() {
        let (controller, dom) = setup(&["a"]);
        controller.handle_data_event(DataEvent::new("a", json!({"v": 1})));
        assert!(controller.mounted_ids().is_empty());
        assert!(dom.renders.borrow().is_empty());
    }

    #[test]
    fn test_early_listeners_hold_events_until_initialize() {
        let (controller, dom) = setup(&["a"]);
        controller.listen_early();
        controller.listen_early();
        assert_eq!(dom.listener_count(EVENT), 1);

        dom.dispatch(EVENT, DataEvent::new("a", json!({"v": 1})));
        dom.dispatch(EVENT, DataEvent::new("a", json!({"v": 2})));
        assert!(dom.renders.borrow().is_empty());

        controller.initialize();
        assert_eq!(dom.listener_count(EVENT), 1);
        assert_eq!(controller.current_tree("a").unwrap().data, json!({"v": 2}));
        // loading, then both held events in order
        assert_eq!(dom.renders_for("a").len(), 3);
    }

    #[test]
    fn test_destroy_discards_held_events() {
        let (controller, dom) = setup(&["a"]);
        controller.listen_early();
        dom.dispatch(EVENT, DataEvent::new("a", json!({"v": 1})));
        controller.destroy();
        assert_eq!(dom.listener_count(EVENT), 0);

        controller.initialize();
        assert!(controller.current_tree("a").unwrap().is_loading());
    }

    #[test]
    fn test_reentrant_dispatch_is_queued() {
        let (controller, dom) = setup(&["a", "b"]);
        controller.initialize();
        *dom.on_render.borrow_mut() = Some((EVENT.to_string(), DataEvent::new("b", json!({"v": 2}))));
        dom.dispatch(EVENT, DataEvent::new("a", json!({"v": 1})));

        assert_eq!(controller.current_tree("a").unwrap().data, json!({"v": 1}));
        assert_eq!(controller.current_tree("b").unwrap().data, json!({"v": 2}));
    }

    #[test]
    fn test_preferences_resolved_from_globals() {
        let (controller, dom) = setup(&["a"]);
        dom.set_global("userSettings", json!({"surfHeightUnit": "ft"}));
        dom.set_global(
            "__INITIAL_STATE__",
            json!({"user": {"settings": {"surfHeightUnit": "m", "windSpeedUnit": "kmh"}}}),
        );
        controller.initialize();
        let prefs = controller.preferences();
        assert_eq!(prefs.surf_height, SurfHeightUnit::Feet);
        assert_eq!(prefs.wind_speed, mfw_forecast::units::WindSpeedUnit::Kmh);
    }

    #[test]
    fn test_dropped_controller_stops_listening() {
        let (controller, dom) = setup(&["a"]);
        controller.initialize();
        drop(controller);
        // Dropping the last handle drops the listeners with it
        assert_eq!(dom.listener_count(EVENT), 0);
        dom.dispatch(EVENT, DataEvent::new("a", json!({"v": 1})));
        assert_eq!(dom.renders.borrow().len(), 1);
    }
}
