//! Startup permission sequence.

use tracing::{info, warn};

use crate::capability::{Capability, PermissionStatus, Platform};

/// Permissions requested once when the host mounts, in this order.
pub const STARTUP_PERMISSIONS: [Capability; 3] = [
    Capability::Notifications,
    Capability::Camera,
    Capability::MediaLibrary,
];

/// Request [`STARTUP_PERMISSIONS`] one after another.
///
/// Outcomes are only logged; a denial or a failed request never stops the
/// sequence. Returns the statuses that were obtained.
pub async fn request_startup_permissions(
    platform: &dyn Platform,
) -> Vec<(Capability, PermissionStatus)> {
    let mut granted = Vec::with_capacity(STARTUP_PERMISSIONS.len());
    for capability in STARTUP_PERMISSIONS {
        match platform.request(capability).await {
            Ok(status) => {
                info!(%capability, ?status, "startup permission");
                granted.push((capability, status));
            }
            Err(e) => {
                warn!(%capability, error = %e, "startup permission request failed");
            }
        }
    }
    granted
}
