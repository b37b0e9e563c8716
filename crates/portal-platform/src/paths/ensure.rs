use std::fs;

use portal_common::PlatformError;

use super::resolve::{cache_dir, config_dir, crash_report_dir, data_dir, log_dir, picked_dir};

/// Creates all Portal directories if they do not already exist.
pub fn ensure_dirs() -> Result<(), PlatformError> {
    for dir in [
        config_dir()?,
        data_dir()?,
        cache_dir()?,
        picked_dir()?,
        log_dir()?,
        crash_report_dir()?,
    ] {
        fs::create_dir_all(&dir).map_err(|e| {
            PlatformError::PathError(format!("failed to create {}: {e}", dir.display()))
        })?;
    }
    Ok(())
}
