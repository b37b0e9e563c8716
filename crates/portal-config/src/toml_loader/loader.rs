//! Core TOML config loading: read from path or platform default.
//!
//! Nothing here logs. Loading runs before the subscriber exists, so the
//! outcome is returned in [`LoadedConfig`] for the caller to report.

use crate::schema::PortalConfig;
use crate::validation;
use portal_common::ConfigError;
use std::path::{Path, PathBuf};

use super::paths::{create_default_config, default_config_path};

/// A config read from disk, after invalid values were reset.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: PortalConfig,
    pub path: PathBuf,
    /// The file did not exist and was written from the template.
    pub created: bool,
    /// Values that failed validation and fell back to their defaults.
    pub problems: Option<ConfigError>,
}

/// Parse a TOML file. Missing fields take their serde defaults; values are
/// not validated.
pub fn load_from_path(path: &Path) -> Result<PortalConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))
}

/// Parse a TOML file and repair whatever fails validation.
pub fn load_and_repair(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let mut config = load_from_path(path)?;
    let problems = validation::repair(&mut config).err();
    Ok(LoadedConfig {
        config,
        path: path.to_path_buf(),
        created: false,
        problems,
    })
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/portal/config.toml`
/// On Linux: `~/.config/portal/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<LoadedConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        create_default_config(&path)?;
        return Ok(LoadedConfig {
            config: PortalConfig::default(),
            path,
            created: true,
            problems: None,
        });
    }

    load_and_repair(&path)
}
