//! What gets rendered into a container.

use crate::error::WidgetError;
use serde::Serialize;
use serde_json::{json, Value};

/// A JS renderer from `assets/js`, each exposed as a `window.*` function
/// taking `(containerId, dataJson, configJson)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Renderer {
    Loading,
    ForecastChart,
    WeatherTable,
    TideChart,
    SurfReport,
    SubscriptionOverlay,
    ModelComparison,
}

impl Renderer {
    pub fn js_function(&self) -> &'static str {
        match self {
            Renderer::Loading => "renderLoading",
            Renderer::ForecastChart => "renderForecastChart",
            Renderer::WeatherTable => "renderWeatherTable",
            Renderer::TideChart => "renderTideChart",
            Renderer::SurfReport => "renderSurfReport",
            Renderer::SubscriptionOverlay => "renderSubscriptionOverlay",
            Renderer::ModelComparison => "renderModelComparison",
        }
    }
}

/// A renderer plus the JSON it is called with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderTree {
    pub renderer: Renderer,
    pub data: Value,
    pub config: Value,
}

impl RenderTree {
    pub fn new<T: Serialize>(renderer: Renderer, data: &T, config: Value) -> Result<Self, WidgetError> {
        let data = serde_json::to_value(data).map_err(|e| WidgetError::Serialization(e.to_string()))?;
        Ok(Self { renderer, data, config })
    }

    /// Placeholder shown until the first data event arrives.
    pub fn loading(message: &str) -> Self {
        Self {
            renderer: Renderer::Loading,
            data: Value::Null,
            config: json!({ "message": message }),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.renderer == Renderer::Loading
    }

    pub fn data_json(&self) -> String {
        self.data.to_string()
    }

    pub fn config_json(&self) -> String {
        self.config.to_string()
    }
}
