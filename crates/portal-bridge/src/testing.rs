//! In-memory platform used by the bridge tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use portal_common::PlatformError;

use crate::capability::*;
use crate::message::{Asset, BridgeResponse, LocationFix};
use crate::router::ReplySink;

/// What a picker does when invoked.
#[derive(Debug, Clone)]
pub(crate) enum PickOutcome {
    Picked(Asset),
    Cancelled,
    Fails,
}

pub(crate) struct FakePlatform {
    denied: HashSet<Capability>,
    failing: HashSet<Capability>,
    position: Option<LocationFix>,
    camera: PickOutcome,
    gallery: PickOutcome,
    document: PickOutcome,
    notifier_fails: bool,
    calls: Mutex<Vec<String>>,
    notifications: Mutex<Vec<LocalNotification>>,
    image_options: Mutex<Vec<ImageOptions>>,
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self {
            denied: HashSet::new(),
            failing: HashSet::new(),
            position: Some(fix()),
            camera: PickOutcome::Picked(asset("photo.jpg")),
            gallery: PickOutcome::Picked(asset("library.jpg")),
            document: PickOutcome::Picked(asset("notes.pdf")),
            notifier_fails: false,
            calls: Mutex::new(Vec::new()),
            notifications: Mutex::new(Vec::new()),
            image_options: Mutex::new(Vec::new()),
        }
    }
}

impl FakePlatform {
    pub fn deny(mut self, capability: Capability) -> Self {
        self.denied.insert(capability);
        self
    }

    pub fn fail_permission(mut self, capability: Capability) -> Self {
        self.failing.insert(capability);
        self
    }

    pub fn no_position(mut self) -> Self {
        self.position = None;
        self
    }

    pub fn camera(mut self, outcome: PickOutcome) -> Self {
        self.camera = outcome;
        self
    }

    pub fn gallery(mut self, outcome: PickOutcome) -> Self {
        self.gallery = outcome;
        self
    }

    pub fn document(mut self, outcome: PickOutcome) -> Self {
        self.document = outcome;
        self
    }

    pub fn failing_notifier(mut self) -> Self {
        self.notifier_fails = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<LocalNotification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn image_options(&self) -> Vec<ImageOptions> {
        self.image_options.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn resolve(outcome: &PickOutcome) -> Result<Option<Asset>, PlatformError> {
        match outcome {
            PickOutcome::Picked(asset) => Ok(Some(asset.clone())),
            PickOutcome::Cancelled => Ok(None),
            PickOutcome::Fails => Err(PlatformError::PickerError("picker crashed".into())),
        }
    }
}

pub(crate) fn fix() -> LocationFix {
    LocationFix {
        latitude: 48.8566,
        longitude: 2.3522,
        accuracy: Some(5.0),
        altitude: None,
        timestamp: 1_700_000_000_000,
    }
}

pub(crate) fn asset(name: &str) -> Asset {
    Asset {
        uri: format!("file:///cache/{name}"),
        name: Some(name.to_string()),
        mime_type: None,
        size: Some(1024),
        width: None,
        height: None,
    }
}

#[async_trait]
impl Permissions for FakePlatform {
    async fn request(&self, capability: Capability) -> Result<PermissionStatus, PlatformError> {
        self.record(format!("permission:{capability}"));
        if self.failing.contains(&capability) {
            return Err(PlatformError::NotSupported(capability.to_string()));
        }
        if self.denied.contains(&capability) {
            Ok(PermissionStatus::Denied)
        } else {
            Ok(PermissionStatus::Granted)
        }
    }
}

#[async_trait]
impl Geolocation for FakePlatform {
    async fn current_position(&self, _accuracy: Accuracy) -> Result<LocationFix, PlatformError> {
        self.record("position");
        self.position
            .clone()
            .ok_or_else(|| PlatformError::LocationUnavailable("no fix".into()))
    }
}

#[async_trait]
impl ImagePicker for FakePlatform {
    async fn capture_image(&self, options: &ImageOptions) -> Result<Option<Asset>, PlatformError> {
        self.record("camera");
        self.image_options.lock().unwrap().push(*options);
        Self::resolve(&self.camera)
    }

    async fn pick_image(&self, options: &ImageOptions) -> Result<Option<Asset>, PlatformError> {
        self.record("gallery");
        self.image_options.lock().unwrap().push(*options);
        Self::resolve(&self.gallery)
    }
}

#[async_trait]
impl DocumentPicker for FakePlatform {
    async fn pick_document(
        &self,
        _options: &DocumentOptions,
    ) -> Result<Option<Asset>, PlatformError> {
        self.record("document");
        Self::resolve(&self.document)
    }
}

#[async_trait]
impl Notifier for FakePlatform {
    async fn schedule_now(&self, notification: &LocalNotification) -> Result<(), PlatformError> {
        self.record("notify");
        if self.notifier_fails {
            return Err(PlatformError::NotificationError("center unavailable".into()));
        }
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

impl Platform for FakePlatform {
    fn platform_name(&self) -> &str {
        "fake"
    }
}

/// Reply sink that keeps everything it is given.
#[derive(Default)]
pub(crate) struct RecordingSink {
    replies: Mutex<Vec<BridgeResponse>>,
}

impl RecordingSink {
    pub fn replies(&self) -> Vec<BridgeResponse> {
        self.replies.lock().unwrap().clone()
    }
}

impl ReplySink for RecordingSink {
    fn post(&self, response: BridgeResponse) {
        self.replies.lock().unwrap().push(response);
    }
}

