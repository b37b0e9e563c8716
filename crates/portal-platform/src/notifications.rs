use async_trait::async_trait;
use tracing::{debug, info};

use portal_bridge::{LocalNotification, NotificationSettings, Notifier};
use portal_common::PlatformError;

/// Shows local notifications through the desktop notification center.
///
/// Presentation settings are fixed at construction; there is no global
/// notification handler.
#[derive(Debug, Clone, Copy)]
pub struct SystemNotifier {
    settings: NotificationSettings,
}

impl SystemNotifier {
    pub fn new(settings: NotificationSettings) -> Self {
        Self { settings }
    }

    /// Show a notification now, blocking until the OS accepted it.
    pub fn notify(&self, title: &str, body: &str) -> Result<(), PlatformError> {
        if !self.settings.show_banner {
            debug!("notification banner disabled; not displaying");
            return Ok(());
        }
        if self.settings.set_badge {
            debug!("badge counts are not supported on desktop");
        }
        platform_notify(title, body, self.settings.play_sound)
    }
}

#[async_trait]
impl Notifier for SystemNotifier {
    async fn schedule_now(&self, notification: &LocalNotification) -> Result<(), PlatformError> {
        let notifier = *self;
        let LocalNotification { title, body } = notification.clone();
        tokio::task::spawn_blocking(move || notifier.notify(&title, &body))
            .await
            .map_err(|e| PlatformError::NotificationError(format!("notification task failed: {e}")))?
    }
}

/// Escape a string for inclusion in an AppleScript string literal.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(target_os = "macos")]
fn platform_notify(title: &str, body: &str, play_sound: bool) -> Result<(), PlatformError> {
    let mut script = format!(
        "display notification \"{}\" with title \"{}\"",
        applescript_escape(body),
        applescript_escape(title)
    );
    if play_sound {
        script.push_str(" sound name \"default\"");
    }

    let output = std::process::Command::new("osascript")
        .arg("-e")
        .arg(&script)
        .output()
        .map_err(|e| PlatformError::NotificationError(format!("failed to run osascript: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PlatformError::NotificationError(format!(
            "osascript failed: {stderr}"
        )));
    }

    info!("native notification sent");
    Ok(())
}

#[cfg(target_os = "linux")]
fn platform_notify(title: &str, body: &str, _play_sound: bool) -> Result<(), PlatformError> {
    // Arguments are passed straight to the process; no shell quoting involved.
    let output = std::process::Command::new("notify-send")
        .arg("--app-name=Portal")
        .arg("--")
        .arg(title)
        .arg(body)
        .output()
        .map_err(|e| PlatformError::NotificationError(format!("failed to run notify-send: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PlatformError::NotificationError(format!(
            "notify-send failed: {stderr}"
        )));
    }

    info!("native notification sent");
    Ok(())
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn platform_notify(title: &str, _body: &str, _play_sound: bool) -> Result<(), PlatformError> {
    info!(title_len = title.len(), "notification (no native center): logged only");
    Ok(())
}
