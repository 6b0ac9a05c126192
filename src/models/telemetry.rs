// Raw telemetry as read from the store: event records and connectivity samples.

use serde::{Deserialize, Serialize};

/// One occurrence of a measured quantity. `timestamp` is epoch milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub timestamp: i64,
    pub value: f64,
}

impl EventRecord {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Device connectivity; serializes to lowercase JSON (e.g. "connected").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityState {
    Connected,
    Disconnected,
}

impl ConnectivityState {
    /// Parse a stored state label. Anything other than "connected" counts as down time.
    pub fn from_label(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "connected" => ConnectivityState::Connected,
            "disconnected" => ConnectivityState::Disconnected,
            other => {
                tracing::debug!(
                    label = %other,
                    "unknown connectivity label, treating as disconnected"
                );
                ConnectivityState::Disconnected
            }
        }
    }

    pub fn as_label(self) -> &'static str {
        match self {
            ConnectivityState::Connected => "connected",
            ConnectivityState::Disconnected => "disconnected",
        }
    }
}

/// Observed connectivity at `timestamp`; holds until the next sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSample {
    pub timestamp: i64,
    pub state: ConnectivityState,
}

impl StateSample {
    pub fn new(timestamp: i64, state: ConnectivityState) -> Self {
        Self { timestamp, state }
    }
}

/// Min/max timestamps present in one record stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataBounds {
    pub min: i64,
    pub max: i64,
}
