//! Where the site comes from, and a reachability check for remote sites.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::content::ORIGIN;

/// The single document the host shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Remote { url: String },
    /// A local HTML file; its directory is served over `portal://`.
    Bundled { path: PathBuf },
}

impl ContentSource {
    /// URL the WebView navigates to.
    pub fn start_url(&self) -> String {
        match self {
            Self::Remote { url } => url.clone(),
            Self::Bundled { path } => {
                let file = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "index.html".to_string());
                format!("{ORIGIN}/{file}")
            }
        }
    }

    /// Directory served by the custom protocol, for bundled sources.
    pub fn bundle_dir(&self) -> Option<&Path> {
        match self {
            Self::Remote { .. } => None,
            Self::Bundled { path } => Some(
                path.parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(Path::new(".")),
            ),
        }
    }

    pub fn remote_url(&self) -> Option<&str> {
        match self {
            Self::Remote { url } => Some(url),
            Self::Bundled { .. } => None,
        }
    }

    /// A description of why this source cannot load, if that is already
    /// known without touching the network.
    pub fn precheck(&self) -> Option<String> {
        match self {
            Self::Bundled { path } if !path.is_file() => Some(format!(
                "The bundled page could not be found at {}.",
                path.display()
            )),
            _ => None,
        }
    }
}

/// Check that `url` answers at all. Any HTTP response counts as reachable;
/// transport failures come back as the transport's description.
pub async fn probe_site(
    url: &str,
    timeout: Duration,
    user_agent: Option<&str>,
) -> Result<(), String> {
    let mut builder = reqwest::Client::builder().timeout(timeout);
    if let Some(ua) = user_agent {
        builder = builder.user_agent(ua);
    }
    let client = builder.build().map_err(|e| e.to_string())?;

    debug!(url, "probing site");
    let response = client.get(url).send().await.map_err(describe)?;
    info!(url, status = %response.status(), "site reachable");
    Ok(())
}

fn describe(error: reqwest::Error) -> String {
    if error.is_timeout() {
        "The request timed out.".to_string()
    } else if error.is_connect() {
        format!("Could not connect to the server. ({error})")
    } else {
        error.to_string()
    }
}
