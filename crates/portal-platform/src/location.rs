//! Location for desktops, which have no positioning hardware.

use chrono::Utc;

use portal_bridge::{Accuracy, LocationFix};
use portal_common::PlatformError;
use portal_config::schema::FixedLocation;

/// Reports a position configured under `[location.fixed]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocationProvider {
    fixed: Option<FixedLocation>,
}

impl FixedLocationProvider {
    pub fn new(fixed: Option<FixedLocation>) -> Self {
        Self { fixed }
    }

    /// Current fix, stamped with the time of the call.
    pub fn current(&self, _accuracy: Accuracy) -> Result<LocationFix, PlatformError> {
        let fixed = self.fixed.ok_or_else(|| {
            PlatformError::LocationUnavailable(
                "no location service on this device; set [location.fixed] in config".into(),
            )
        })?;
        Ok(LocationFix {
            latitude: fixed.latitude,
            longitude: fixed.longitude,
            accuracy: fixed.accuracy,
            altitude: None,
            timestamp: Utc::now().timestamp_millis(),
        })
    }
}
