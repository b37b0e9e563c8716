//! Portal configuration system.
//!
//! TOML-based configuration for the site shell. Every section uses serde
//! defaults so a partial (or empty) `config.toml` works out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use portal_config::{load_config, config_to_json};
//!
//! let loaded = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&loaded.config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{PortalConfig, CONFIG_SCHEMA_VERSION};
pub use toml_loader::LoadedConfig;

use std::path::Path;

use portal_common::ConfigError;

/// Load config from the platform default path, resetting invalid values.
///
/// Creates a commented default `config.toml` if none exists.
pub fn load_config() -> Result<LoadedConfig, ConfigError> {
    toml_loader::load_default()
}

/// Load config from an explicit path (the `--config` override), resetting
/// invalid values.
pub fn load_config_from(path: &Path) -> Result<LoadedConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    toml_loader::load_and_repair(path)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &PortalConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
