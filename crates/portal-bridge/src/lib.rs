//! Capability bridge between the embedded site and the host device.
//!
//! The page posts `{type, data}` envelopes; the [`CapabilityRouter`] turns
//! each one into a typed [`BridgeRequest`], performs the single platform
//! call it maps to, and posts at most one [`BridgeResponse`] back.
//!
//! Platform access goes through the traits in [`capability`], so the
//! router can run against a real desktop backend or an in-memory fake.

pub mod capability;
pub mod message;
pub mod permissions;
pub mod router;

pub use capability::{
    Accuracy, Capability, DocumentOptions, DocumentPicker, Geolocation, ImageOptions,
    ImagePicker, LocalNotification, NotificationSettings, Notifier, PermissionStatus,
    Permissions, Platform,
};
pub use message::{
    parse_request, Asset, BridgeRequest, BridgeResponse, ConsoleLevel, Envelope, LocationFix,
};
pub use permissions::{request_startup_permissions, STARTUP_PERMISSIONS};
pub use router::{CapabilityRouter, ReplySink, RouterOptions};

#[cfg(test)]
pub(crate) mod testing;
