//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The D3.js renderers live in `assets/js/*.js` and are evaluated as globals
//! (no ES modules), then exposed via `window.*`. Every widget bundle on a
//! page embeds the same scripts, so they are evaluated once per page.

use crate::tree::{RenderTree, Renderer};

static TOOLTIP_JS: &str = include_str!("../assets/js/tooltip.js");
static LOADING_JS: &str = include_str!("../assets/js/loading.js");
static FORECAST_CHART_JS: &str = include_str!("../assets/js/forecast-chart.js");
static WEATHER_TABLE_JS: &str = include_str!("../assets/js/weather-table.js");
static TIDE_CHART_JS: &str = include_str!("../assets/js/tide-chart.js");
static SURF_REPORT_JS: &str = include_str!("../assets/js/surf-report.js");
static SUBSCRIPTION_OVERLAY_JS: &str = include_str!("../assets/js/subscription-overlay.js");
static MODEL_COMPARISON_JS: &str = include_str!("../assets/js/model-comparison-chart.js");

/// Poll interval while waiting for D3, the renderers and the container.
const POLL_INTERVAL_MS: u32 = 100;
/// Give up after this many polls (10 seconds).
const MAX_POLLS: u32 = 100;

const RENDERERS: [Renderer; 7] = [
    Renderer::Loading,
    Renderer::ForecastChart,
    Renderer::WeatherTable,
    Renderer::TideChart,
    Renderer::SurfReport,
    Renderer::SubscriptionOverlay,
    Renderer::ModelComparison,
];

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('MFW JS call failed:', e); }}",
        code
    );
    if let Err(e) = js_sys::eval(&wrapped) {
        log::warn!("JS eval failed: {:?}", e);
    }
}

/// Quote a Rust string as a JS string literal.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Initialize the renderer scripts with a wait-for-D3 polling loop.
///
/// The scripts are stored on `window` and evaluated at global scope by
/// indirect eval once D3 is present, then each renderer is promoted to
/// `window.*` and `__mfwScriptsReady` is set.
pub fn init_widget_scripts() {
    let all_js = [
        TOOLTIP_JS,
        LOADING_JS,
        FORECAST_CHART_JS,
        WEATHER_TABLE_JS,
        TIDE_CHART_JS,
        SURF_REPORT_JS,
        SUBSCRIPTION_OVERLAY_JS,
        MODEL_COMPARISON_JS,
    ]
    .join("\n");

    let promote: String = RENDERERS
        .iter()
        .map(|r| r.js_function())
        .chain(["initTooltip", "showTooltip", "hideTooltip"])
        .map(|name| {
            format!(
                "if (typeof {name} !== 'undefined') window.{name} = {name};\n",
                name = name
            )
        })
        .collect();

    call_js(&format!(
        r#"
        if (!window.__mfwScriptsLoaded) {{
            window.__mfwScriptsLoaded = true;
            window.__mfwWidgetScripts = {scripts};
            var waitForD3 = setInterval(function() {{
                if (typeof d3 !== 'undefined') {{
                    clearInterval(waitForD3);
                    (0, eval)(window.__mfwWidgetScripts);
                    delete window.__mfwWidgetScripts;
                    {promote}
                    window.__mfwScriptsReady = true;
                    console.log('MFW widget scripts initialized');
                }}
            }}, {interval});
        }}
        "#,
        scripts = js_string(&all_js),
        promote = promote,
        interval = POLL_INTERVAL_MS,
    ));
}

/// Build the script that draws `renderer` into `container_id`.
///
/// Each call takes a fresh generation token for the container, so a
/// pending poll from an older render (or a destroy) stops instead of
/// drawing stale data over a newer render. Polling gives up after
/// `MAX_POLLS` attempts.
pub fn render_script(function: &str, container_id: &str, data_json: &str, config_json: &str) -> String {
    let id = js_string(container_id);
    let function = js_string(function);
    format!(
        r#"
        (function() {{
            var tokens = window.__mfwTokens = window.__mfwTokens || {{}};
            var token = (tokens[{id}] || 0) + 1;
            tokens[{id}] = token;
            var attempts = 0;
            var poll = setInterval(function() {{
                if (tokens[{id}] !== token) {{ clearInterval(poll); return; }}
                if (++attempts > {max_polls}) {{
                    clearInterval(poll);
                    console.warn('[MFW] gave up rendering', {function}, 'into', {id});
                    return;
                }}
                if (window.__mfwScriptsReady &&
                    typeof window[{function}] === 'function' &&
                    document.getElementById({id})) {{
                    clearInterval(poll);
                    try {{
                        window[{function}]({id}, {data}, {config});
                    }} catch(e) {{ console.error('[MFW]', {function}, 'error:', e); }}
                }}
            }}, {interval});
        }})();
        "#,
        id = id,
        function = function,
        data = js_string(data_json),
        config = js_string(config_json),
        max_polls = MAX_POLLS,
        interval = POLL_INTERVAL_MS,
    )
}

/// Draw a render tree into the container with DOM id `container_id`.
pub fn render_widget(container_id: &str, tree: &RenderTree) {
    call_js(&render_script(
        tree.renderer.js_function(),
        container_id,
        &tree.data_json(),
        &tree.config_json(),
    ));
}

/// Build the script that cancels pending renders and clears the container.
pub fn destroy_script(container_id: &str) -> String {
    let id = js_string(container_id);
    format!(
        "var tokens = window.__mfwTokens = window.__mfwTokens || {{}}; \
         tokens[{id}] = (tokens[{id}] || 0) + 1; \
         var el = document.getElementById({id}); if (el) el.innerHTML = '';",
        id = id
    )
}

/// Destroy/clean up a widget in the given container.
pub fn destroy_widget(container_id: &str) {
    call_js(&destroy_script(container_id));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_script_quotes_arguments() {
        let script = render_script(
            "renderTideChart",
            "mfw-tide's",
            r#"{"points":[],"note":"it's"}"#,
            "{}",
        );
        assert!(script.contains(r#"window["renderTideChart"]"#));
        assert!(script.contains(r#"tokens["mfw-tide's"]"#));
        // Data is passed as a JS string literal, not inlined as code
        assert!(script.contains(r#""{\"points\":[],\"note\":\"it's\"}""#));
        assert!(script.contains("++attempts > 100"));
    }

    #[test]
    fn test_render_script_escapes_newlines() {
        let script = render_script("renderLoading", "c", "{\"message\":\"a\nb\"}", "{}");
        assert!(!script.contains("a\nb"));
    }

    #[test]
    fn test_destroy_script_bumps_token() {
        let script = destroy_script("mfw-c1");
        assert!(script.contains(r#"tokens["mfw-c1"] = (tokens["mfw-c1"] || 0) + 1"#));
        assert!(script.contains("innerHTML = ''"));
    }

    #[test]
    fn test_every_renderer_is_promoted() {
        for renderer in RENDERERS {
            let name = renderer.js_function();
            let all = [
                LOADING_JS,
                FORECAST_CHART_JS,
                WEATHER_TABLE_JS,
                TIDE_CHART_JS,
                SURF_REPORT_JS,
                SUBSCRIPTION_OVERLAY_JS,
                MODEL_COMPARISON_JS,
            ]
            .join("\n");
            assert!(all.contains(&format!("function {}(", name)), "{} missing", name);
        }
    }
}
