//! Content source settings: which site the shell displays.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The single site shown in the embedded browser.
///
/// When `bundled` is set it wins over `url` and the document is served
/// from disk over the `portal://` scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Remote site URL (must be http or https).
    pub url: String,
    /// Path to a bundled offline document (e.g. `site/index.html`).
    pub bundled: Option<PathBuf>,
    /// Custom user agent string.
    pub user_agent: Option<String>,
    /// Extra origins the page may navigate to besides its own.
    pub allowed_origins: Vec<String>,
    /// Check that the remote site is reachable before loading it.
    pub probe: bool,
    /// Reachability probe timeout in seconds (valid range: 1-120).
    pub probe_timeout_secs: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "https://example.com".into(),
            bundled: None,
            user_agent: Some(format!("Portal/{}", env!("CARGO_PKG_VERSION"))),
            allowed_origins: Vec::new(),
            probe: true,
            probe_timeout_secs: 15,
        }
    }
}
