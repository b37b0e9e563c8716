//! Capability router: inbound envelope -> one platform call -> optional reply.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use portal_common::BridgeError;

use crate::capability::{
    Accuracy, Capability, DocumentOptions, ImageOptions, LocalNotification, PermissionStatus,
    Platform,
};
use crate::message::{parse_request, Asset, BridgeRequest, BridgeResponse, ConsoleLevel};


/// Log target for messages forwarded from the page's console.
pub const PAGE_LOG_TARGET: &str = "portal::page";

/// Where replies go. The host drains them on its UI thread.
pub trait ReplySink: Send + Sync {
    fn post(&self, response: BridgeResponse);
}

impl ReplySink for std::sync::mpsc::Sender<BridgeResponse> {
    fn post(&self, response: BridgeResponse) {
        let kind = response.kind();
        if self.send(response).is_err() {
            debug!(kind, "reply dropped: host receiver is gone");
        }
    }
}

/// Per-capability call options.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    pub image: ImageOptions,
    pub document: DocumentOptions,
    pub accuracy: Accuracy,
}

/// Maps each inbound bridge message to exactly one capability call.
///
/// Every message runs as its own task: a slow permission dialog or an open
/// picker blocks only the message that opened it.
pub struct CapabilityRouter {
    platform: Arc<dyn Platform>,
    sink: Arc<dyn ReplySink>,
    runtime: Handle,
    options: RouterOptions,
}

impl CapabilityRouter {
    pub fn new(platform: Arc<dyn Platform>, sink: Arc<dyn ReplySink>, runtime: Handle) -> Self {
        Self {
            platform,
            sink,
            runtime,
            options: RouterOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RouterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Entry point for a raw string posted by the page.
    ///
    /// Never blocks and never fails: the message is handled on its own task.
    pub fn on_inbound_message(self: &Arc<Self>, raw: impl Into<String>) -> JoinHandle<()> {
        let router = Arc::clone(self);
        let raw = raw.into();
        self.runtime
            .spawn(async move { router.handle_raw(&raw).await })
    }

    /// Parse, dispatch, and post the reply (if any) to the sink.
    pub async fn handle_raw(&self, raw: &str) {
        let request = match parse_request(raw) {
            Ok(request) => request,
            Err(BridgeError::UnknownType(kind)) => {
                debug!(kind = %kind, "bridge message ignored: unknown type");
                return;
            }
            Err(e) => {
                warn!(body_len = raw.len(), error = %e, "bridge message rejected");
                return;
            }
        };

        if let Some(reply) = self.dispatch(request).await {
            debug!(kind = reply.kind(), "posting reply to page");
            self.sink.post(reply);
        }
    }

    /// Perform the platform call for `request` and build its reply.
    pub async fn dispatch(&self, request: BridgeRequest) -> Option<BridgeResponse> {
        if !matches!(request, BridgeRequest::ConsoleLog { .. }) {
            info!(kind = request.kind(), "bridge request");
        }

        match request {
            BridgeRequest::Location => Some(self.locate().await),
            BridgeRequest::Camera => self.capture_image().await.map(BridgeResponse::ImageCaptured),
            BridgeRequest::Gallery => self.pick_image().await.map(BridgeResponse::ImageSelected),
            BridgeRequest::FilePicker => {
                self.pick_document().await.map(BridgeResponse::FileSelected)
            }
            BridgeRequest::Notification(notification) => {
                self.notify(&notification).await;
                None
            }
            BridgeRequest::ConsoleLog { level, message } => {
                log_page_console(level, &message);
                None
            }
        }
    }

    async fn locate(&self) -> BridgeResponse {
        match self.platform.request(Capability::Location).await {
            Ok(PermissionStatus::Granted) => {}
            Ok(status) => {
                info!(?status, "location permission not granted");
                return location_error("Location permission denied");
            }
            Err(e) => {
                warn!(error = %e, "location permission request failed");
                return location_error(format!("Location permission request failed: {e}"));
            }
        }

        match self.platform.current_position(self.options.accuracy).await {
            Ok(fix) => BridgeResponse::Location(fix),
            Err(e) => {
                warn!(error = %e, "failed to get current position");
                location_error(e.to_string())
            }
        }
    }

    async fn capture_image(&self) -> Option<Asset> {
        match self.platform.capture_image(&self.options.image).await {
            Ok(asset) => cancelled_is_none("camera", asset),
            Err(e) => {
                warn!(error = %e, "camera capture failed");
                None
            }
        }
    }

    async fn pick_image(&self) -> Option<Asset> {
        match self.platform.pick_image(&self.options.image).await {
            Ok(asset) => cancelled_is_none("gallery", asset),
            Err(e) => {
                warn!(error = %e, "image picker failed");
                None
            }
        }
    }

    async fn pick_document(&self) -> Option<Asset> {
        match self.platform.pick_document(&self.options.document).await {
            Ok(asset) => cancelled_is_none("file-picker", asset),
            Err(e) => {
                warn!(error = %e, "document picker failed");
                None
            }
        }
    }

    async fn notify(&self, notification: &LocalNotification) {
        if let Err(e) = self.platform.schedule_now(notification).await {
            warn!(error = %e, "failed to schedule notification");
        }
    }
}

fn location_error(message: impl Into<String>) -> BridgeResponse {
    BridgeResponse::LocationError {
        message: message.into(),
    }
}

fn cancelled_is_none(kind: &'static str, asset: Option<Asset>) -> Option<Asset> {
    if asset.is_none() {
        debug!(kind, "picker cancelled by user");
    }
    asset
}

fn log_page_console(level: ConsoleLevel, message: &str) {
    match level {
        ConsoleLevel::Error => tracing::error!(target: PAGE_LOG_TARGET, "{message}"),
        ConsoleLevel::Warn => tracing::warn!(target: PAGE_LOG_TARGET, "{message}"),
        ConsoleLevel::Info | ConsoleLevel::Log => {
            tracing::info!(target: PAGE_LOG_TARGET, "{message}")
        }
        ConsoleLevel::Debug => tracing::debug!(target: PAGE_LOG_TARGET, "{message}"),
    }
}
