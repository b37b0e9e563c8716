//! Developer and logging settings.

use serde::{Deserialize, Serialize};

/// Developer conveniences. Both default to on in debug builds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DevConfig {
    pub devtools: bool,
    /// Mirror in-page `console.*` calls into the host log.
    pub forward_console: bool,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            devtools: cfg!(debug_assertions),
            forward_console: cfg!(debug_assertions),
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `tracing` filter directive for the portal crates at this level.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "portal=debug",
            LogLevel::Info => "portal=info",
            LogLevel::Warning => "portal=warn",
            LogLevel::Error => "portal=error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
