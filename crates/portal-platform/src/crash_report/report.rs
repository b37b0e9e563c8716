use std::any::Any;
use std::backtrace::Backtrace;
use std::panic::PanicHookInfo;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::paths::crash_report_dir;

use super::sanitize::sanitize_secrets;

/// Write a crash report for a panic into the crash report directory.
///
/// Called from the panic hook: never panics, returns `None` on any failure.
pub fn write_crash_report(info: &PanicHookInfo) -> Option<PathBuf> {
    let dir = crash_report_dir().ok()?;
    let location = info
        .location()
        .map(|loc| (loc.file().to_string(), loc.line(), loc.column()));
    let report = render_report(
        &payload_message(info.payload()),
        location,
        std::thread::current().name(),
        &Backtrace::force_capture().to_string(),
    );
    write_report(&dir, &report)
}

/// Best-effort text of a panic payload.
pub(super) fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Build the report document. Free text is passed through the secret
/// scrubber, since panic messages can carry URLs from the page.
pub(super) fn render_report(
    message: &str,
    location: Option<(String, u32, u32)>,
    thread: Option<&str>,
    backtrace: &str,
) -> Value {
    json!({
        "app": "portal",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "os": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
        "thread": thread.unwrap_or("<unnamed>"),
        "panic_message": sanitize_secrets(message),
        "location": location.map(|(file, line, column)| json!({
            "file": file,
            "line": line,
            "column": column,
        })),
        "backtrace": sanitize_secrets(backtrace),
    })
}

/// Persist `report` as `crash_<timestamp>.json` in `dir`, owner-only on Unix.
pub(super) fn write_report(dir: &Path, report: &Value) -> Option<PathBuf> {
    let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S_%3f");
    let path = dir.join(format!("crash_{stamp}.json"));

    std::fs::create_dir_all(dir).ok()?;
    std::fs::write(&path, serde_json::to_string_pretty(report).ok()?).ok()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600));
    }

    Some(path)
}
