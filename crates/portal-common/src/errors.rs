use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures reported by a device capability backend.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("notification error: {0}")]
    NotificationError(String),

    #[error("picker error: {0}")]
    PickerError(String),

    #[error("image error: {0}")]
    ImageError(String),

    #[error("location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("not supported: {0}")]
    NotSupported(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reasons an inbound bridge message was not turned into a request.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unknown message type: {0}")]
    UnknownType(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("{0}")]
    Other(String),
}
