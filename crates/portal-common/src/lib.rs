pub mod errors;
pub mod mime;

pub use errors::{BridgeError, ConfigError, PlatformError, PortalError};
pub use mime::mime_from_extension;

pub type Result<T> = std::result::Result<T, PortalError>;
