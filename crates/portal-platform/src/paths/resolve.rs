use std::path::PathBuf;

use portal_common::PlatformError;

pub(super) const APP_NAME: &str = "portal";

/// Returns the platform-specific configuration directory for Portal.
///
/// - macOS: `~/Library/Application Support/portal`
/// - Linux: `$XDG_CONFIG_HOME/portal` (defaults to `~/.config/portal`)
/// - Windows: `%APPDATA%\portal`
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Returns the platform-specific data directory for Portal.
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Returns the platform-specific cache directory for Portal.
///
/// - macOS: `~/Library/Caches/portal`
/// - Linux: `$XDG_CACHE_HOME/portal` (defaults to `~/.cache/portal`)
pub fn cache_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::cache_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine cache directory".into()))?
        .join(APP_NAME))
}

/// Where picked files and re-encoded images are copied: `cache_dir()/picked`.
pub fn picked_dir() -> Result<PathBuf, PlatformError> {
    Ok(cache_dir()?.join("picked"))
}

/// Returns the path to the log directory: `data_dir()/logs`.
pub fn log_dir() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("logs"))
}

/// Returns the path to the crash report directory: `log_dir()/crash-reports`.
pub fn crash_report_dir() -> Result<PathBuf, PlatformError> {
    Ok(log_dir()?.join("crash-reports"))
}
