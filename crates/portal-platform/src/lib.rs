//! Desktop implementations of the bridge capabilities.
//!
//! - Notifications: `osascript` on macOS, `notify-send` on Linux, log elsewhere
//! - Image library and documents: native file dialogs (`rfd`)
//! - Images are re-encoded as JPEG at the configured quality into the cache
//! - Permissions: per-capability policy, optionally prompting with a dialog
//! - Location: a fixed position from config (desktops have no GPS)
//! - Camera: not available on desktop

pub mod crash_report;
pub mod desktop;
pub mod images;
pub mod location;
pub mod notifications;
pub mod paths;
pub mod permissions;
pub mod pickers;

pub use desktop::DesktopPlatform;
pub use notifications::SystemNotifier;
pub use paths::{cache_dir, config_dir, crash_report_dir, data_dir, ensure_dirs, log_dir, picked_dir};
