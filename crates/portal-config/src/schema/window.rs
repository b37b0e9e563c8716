use serde::{Deserialize, Serialize};

/// Top-level window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial logical width (valid range: 200-7680).
    pub width: u32,
    /// Initial logical height (valid range: 200-4320).
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Portal".into(),
            width: 1024,
            height: 768,
        }
    }
}
