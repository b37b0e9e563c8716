//! Configuration schema types for Portal.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod capture;
mod location;
mod notifications;
mod permissions;
mod site;
mod system;
mod window;

pub use capture::*;
pub use location::*;
pub use notifications::*;
pub use permissions::*;
pub use site::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Portal.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PortalConfig {
    pub site: SiteConfig,
    pub capture: CaptureConfig,
    pub notifications: NotificationsConfig,
    pub permissions: PermissionsConfig,
    pub location: LocationConfig,
    pub window: WindowConfig,
    pub dev: DevConfig,
    pub logging: LoggingConfig,
}
