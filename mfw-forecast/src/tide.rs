use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TideKind {
    High,
    Low,
}

/// A single tide height sample, in meters relative to chart datum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TideReading {
    pub time: DateTime<Utc>,
    pub height: f64,
    /// Set by the host when the sample is a known high or low water.
    #[serde(default)]
    pub kind: Option<TideKind>,
}
