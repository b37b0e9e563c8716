use serde::{Deserialize, Serialize};

/// Camera and gallery capture settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// JPEG quality for captured/picked images (valid range: 0.0-1.0).
    pub image_quality: f64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { image_quality: 0.8 }
    }
}
