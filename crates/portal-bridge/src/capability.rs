//! Platform-agnostic trait definitions for device capabilities.
//!
//! The router only ever talks to these traits. Each method is one platform
//! call; pickers return `Ok(None)` when the user cancels.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use portal_common::PlatformError;

use crate::message::{Asset, LocationFix};

/// A device feature that sits behind an OS permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Notifications,
    Camera,
    MediaLibrary,
    Location,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notifications => "notifications",
            Self::Camera => "camera",
            Self::MediaLibrary => "media_library",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user dismissed the prompt without answering.
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// Requested position accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accuracy {
    Balanced,
    #[default]
    High,
}

/// Options shared by camera capture and the image library picker.
/// Only still images are ever requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageOptions {
    /// Compression quality in `0.0..=1.0`.
    pub quality: f64,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self { quality: 0.8 }
    }
}

/// Options for the document picker.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentOptions {
    /// Accepted MIME types; `*/*` accepts anything.
    pub mime_types: Vec<String>,
    /// Copy the picked file into the app cache before handing it out.
    pub copy_to_cache: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            mime_types: vec!["*/*".to_string()],
            copy_to_cache: true,
        }
    }
}

/// A local notification to show immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalNotification {
    pub title: String,
    pub body: String,
}

/// How notifications are presented while the app is in the foreground.
/// Handed to the notifier once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationSettings {
    pub show_banner: bool,
    pub play_sound: bool,
    pub set_badge: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            show_banner: true,
            play_sound: true,
            set_badge: false,
        }
    }
}

#[async_trait]
pub trait Permissions: Send + Sync {
    /// Ask the OS (or the user) for access to `capability`.
    async fn request(&self, capability: Capability) -> Result<PermissionStatus, PlatformError>;
}

#[async_trait]
pub trait Geolocation: Send + Sync {
    /// Fetch the current position. No timeout is applied.
    async fn current_position(&self, accuracy: Accuracy) -> Result<LocationFix, PlatformError>;
}

#[async_trait]
pub trait ImagePicker: Send + Sync {
    /// Launch the camera. `Ok(None)` if the user cancelled.
    async fn capture_image(&self, options: &ImageOptions) -> Result<Option<Asset>, PlatformError>;

    /// Launch the image library picker. `Ok(None)` if the user cancelled.
    async fn pick_image(&self, options: &ImageOptions) -> Result<Option<Asset>, PlatformError>;
}

#[async_trait]
pub trait DocumentPicker: Send + Sync {
    /// Launch the document picker. `Ok(None)` if the user cancelled.
    async fn pick_document(
        &self,
        options: &DocumentOptions,
    ) -> Result<Option<Asset>, PlatformError>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show `notification` now.
    async fn schedule_now(&self, notification: &LocalNotification) -> Result<(), PlatformError>;
}

/// Everything the router needs from the host device.
pub trait Platform: Permissions + Geolocation + ImagePicker + DocumentPicker + Notifier {
    /// Human-readable platform name (e.g. "macOS desktop").
    fn platform_name(&self) -> &str;
}
