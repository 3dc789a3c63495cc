//! Entry point shared by the per-family WASM binaries.

use crate::controller::{Controller, WidgetFamily};
use crate::dom::WebPage;
use crate::js_bridge;
use anyhow::anyhow;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{PageTransitionEvent, Window};

/// Delay used when the browser has no `requestIdleCallback`.
const IDLE_FALLBACK_MS: i32 = 0;

/// Start a widget family on the current page.
///
/// Deferrable families listen at once but initialize once the browser is
/// idle, replaying any data heard in between; the rest initialize
/// immediately. Every family unmounts on `pagehide` and mounts
/// again when the page is restored from the back/forward cache.
pub fn launch<F: WidgetFamily + 'static>(family: F) -> anyhow::Result<()> {
    js_bridge::init_widget_scripts();

    let page = WebPage::new()?;
    let window = page.window().clone();
    let kind = family.family();
    let controller = Controller::new(family, page);

    watch_page_lifecycle(&window, &controller)?;

    if kind.is_deferrable() {
        log::info!("[MFW] {} deferred until idle", kind.name());
        controller.listen_early();
        let deferred = controller.clone();
        when_idle(&window, move || deferred.initialize())?;
    } else {
        controller.initialize();
    }
    Ok(())
}

/// Run `f` once the browser is idle, or on the next tick without
/// `requestIdleCallback`.
pub fn when_idle(window: &Window, f: impl FnOnce() + 'static) -> anyhow::Result<()> {
    let callback = Closure::once_into_js(f);
    let request_idle = js_sys::Reflect::get(window, &JsValue::from_str("requestIdleCallback"))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok());

    match request_idle {
        Some(request_idle) => {
            request_idle
                .call1(window, &callback)
                .map_err(|e| anyhow!("requestIdleCallback failed: {:?}", e))?;
        }
        None => {
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.unchecked_ref(),
                    IDLE_FALLBACK_MS,
                )
                .map_err(|e| anyhow!("setTimeout failed: {:?}", e))?;
        }
    }
    Ok(())
}

fn watch_page_lifecycle<F: WidgetFamily + 'static>(
    window: &Window,
    controller: &Controller<F, WebPage>,
) -> anyhow::Result<()> {
    let hidden = controller.clone();
    let on_hide = Closure::<dyn FnMut(PageTransitionEvent)>::wrap(Box::new(move |_event: PageTransitionEvent| {
        hidden.destroy();
    }));
    window
        .add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref())
        .map_err(|e| anyhow!("failed to listen for pagehide: {:?}", e))?;
    on_hide.forget();

    let shown = controller.clone();
    let on_show = Closure::<dyn FnMut(PageTransitionEvent)>::wrap(Box::new(move |event: PageTransitionEvent| {
        // First load is handled by launch; only bfcache restores remount.
        if event.persisted() {
            shown.initialize();
        }
    }));
    window
        .add_event_listener_with_callback("pageshow", on_show.as_ref().unchecked_ref())
        .map_err(|e| anyhow!("failed to listen for pageshow: {:?}", e))?;
    on_show.forget();
    Ok(())
}
