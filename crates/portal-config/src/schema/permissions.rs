//! Per-capability permission policy.

use serde::{Deserialize, Serialize};

/// What to do when the page asks for a capability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PermissionPolicy {
    /// Prompt the user with a native dialog.
    #[default]
    Ask,
    Allow,
    Deny,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionsConfig {
    pub notifications: PermissionPolicy,
    pub camera: PermissionPolicy,
    pub media_library: PermissionPolicy,
    pub location: PermissionPolicy,
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            notifications: PermissionPolicy::Allow,
            camera: PermissionPolicy::Allow,
            media_library: PermissionPolicy::Allow,
            location: PermissionPolicy::Ask,
        }
    }
}
