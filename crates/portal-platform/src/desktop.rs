use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, warn};

use portal_bridge::{
    Accuracy, Asset, Capability, DocumentOptions, DocumentPicker, Geolocation, ImageOptions,
    ImagePicker, LocalNotification, LocationFix, NotificationSettings, Notifier, PermissionStatus,
    Permissions, Platform,
};
use portal_common::PlatformError;
use portal_config::PortalConfig;

use crate::location::FixedLocationProvider;
use crate::notifications::SystemNotifier;
use crate::paths::picked_dir;
use crate::permissions::PolicyPermissions;
use crate::pickers::DialogPickers;

/// The capability backend used on macOS, Linux and Windows desktops.
pub struct DesktopPlatform {
    name: &'static str,
    permissions: PolicyPermissions,
    location: FixedLocationProvider,
    pickers: DialogPickers,
    notifier: SystemNotifier,
}

impl DesktopPlatform {
    /// Build the backend from config, caching picked files under the
    /// platform cache directory.
    pub fn new(config: &PortalConfig) -> Result<Self, PlatformError> {
        Ok(Self::with_picked_dir(config, picked_dir()?))
    }

    pub fn with_picked_dir(config: &PortalConfig, picked: impl Into<PathBuf>) -> Self {
        let notifications = &config.notifications;
        Self {
            name: desktop_name(),
            permissions: PolicyPermissions::new(config.permissions.clone()),
            location: FixedLocationProvider::new(config.location.fixed),
            pickers: DialogPickers::new(picked),
            notifier: SystemNotifier::new(NotificationSettings {
                show_banner: notifications.show_banner,
                play_sound: notifications.play_sound,
                set_badge: notifications.set_badge,
            }),
        }
    }
}

fn desktop_name() -> &'static str {
    if cfg!(target_os = "macos") {
        "macOS desktop"
    } else if cfg!(target_os = "windows") {
        "Windows desktop"
    } else {
        "Linux desktop"
    }
}

#[async_trait]
impl Permissions for DesktopPlatform {
    async fn request(&self, capability: Capability) -> Result<PermissionStatus, PlatformError> {
        self.permissions.request(capability).await
    }
}

#[async_trait]
impl Geolocation for DesktopPlatform {
    async fn current_position(&self, accuracy: Accuracy) -> Result<LocationFix, PlatformError> {
        self.location.current(accuracy)
    }
}

#[async_trait]
impl ImagePicker for DesktopPlatform {
    async fn capture_image(&self, _options: &ImageOptions) -> Result<Option<Asset>, PlatformError> {
        warn!("camera capture requested but no camera backend exists on desktop");
        Err(PlatformError::NotSupported(
            "camera capture is not available on desktop".into(),
        ))
    }

    async fn pick_image(&self, options: &ImageOptions) -> Result<Option<Asset>, PlatformError> {
        self.pickers.pick_image(options).await
    }
}

#[async_trait]
impl DocumentPicker for DesktopPlatform {
    async fn pick_document(
        &self,
        options: &DocumentOptions,
    ) -> Result<Option<Asset>, PlatformError> {
        self.pickers.pick_document(options).await
    }
}

#[async_trait]
impl Notifier for DesktopPlatform {
    async fn schedule_now(&self, notification: &LocalNotification) -> Result<(), PlatformError> {
        debug!(title = %notification.title, "showing notification");
        self.notifier.schedule_now(notification).await
    }
}

impl Platform for DesktopPlatform {
    fn platform_name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use portal_config::schema::{FixedLocation, PermissionPolicy};

    use super::*;

    fn platform(config: &PortalConfig) -> (DesktopPlatform, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        (DesktopPlatform::with_picked_dir(config, dir.path()), dir)
    }

    #[tokio::test]
    async fn camera_is_not_supported() {
        let (platform, _dir) = platform(&PortalConfig::default());
        let err = platform
            .capture_image(&ImageOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::NotSupported(_)));
    }

    #[tokio::test]
    async fn location_follows_config() {
        let mut config = PortalConfig::default();
        config.permissions.location = PermissionPolicy::Allow;
        config.location.fixed = Some(FixedLocation {
            latitude: 40.0,
            longitude: -74.0,
            accuracy: None,
        });
        let (platform, _dir) = platform(&config);

        let status = platform.request(Capability::Location).await.unwrap();
        assert!(status.is_granted());
        let fix = platform.current_position(Accuracy::High).await.unwrap();
        assert_eq!(fix.latitude, 40.0);
        assert_eq!(fix.accuracy, None);
    }

    #[tokio::test]
    async fn default_startup_permissions_are_granted() {
        let (platform, _dir) = platform(&PortalConfig::default());
        let outcomes = portal_bridge::request_startup_permissions(&platform).await;
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|(_, status)| status.is_granted()));
    }

    #[test]
    fn has_a_platform_name() {
        let (platform, _dir) = platform(&PortalConfig::default());
        assert!(platform.platform_name().ends_with("desktop"));
    }
}
