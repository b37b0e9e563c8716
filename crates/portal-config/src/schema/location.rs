use serde::{Deserialize, Serialize};

/// A fixed position reported to the page on hosts without a location service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FixedLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy radius in meters.
    #[serde(default)]
    pub accuracy: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LocationConfig {
    pub fixed: Option<FixedLocation>,
}
