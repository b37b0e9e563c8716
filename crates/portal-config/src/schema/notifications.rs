use serde::{Deserialize, Serialize};

/// How local notifications are presented while the app is running.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    pub show_banner: bool,
    pub play_sound: bool,
    pub set_badge: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            show_banner: true,
            play_sound: true,
            set_badge: false,
        }
    }
}
