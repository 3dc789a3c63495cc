use mfw_forecast::event::Family;
use std::fmt;

/// Why a family could not turn a payload into a render tree.
///
/// None of these are fatal: the controller logs them and leaves the
/// container as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetError {
    /// The payload did not match the family's event schema.
    InvalidPayload { family: Family, reason: String },
    /// The payload decoded but holds nothing to draw.
    NoData { family: Family },
    /// `data-chart-type` names a chart this bundle cannot draw.
    UnknownChartType(String),
    /// Render data could not be serialized for the JS renderer.
    Serialization(String),
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetError::InvalidPayload { family, reason } => {
                write!(f, "Invalid {} payload: {}", family.name(), reason)
            }
            WidgetError::NoData { family } => write!(f, "No {} data to render", family.name()),
            WidgetError::UnknownChartType(kind) => write!(f, "Unknown chart type: {}", kind),
            WidgetError::Serialization(reason) => write!(f, "Serialization error: {}", reason),
        }
    }
}

impl std::error::Error for WidgetError {}

impl From<mfw_data::chart::UnknownChartType> for WidgetError {
    fn from(err: mfw_data::chart::UnknownChartType) -> Self {
        WidgetError::UnknownChartType(err.0)
    }
}
