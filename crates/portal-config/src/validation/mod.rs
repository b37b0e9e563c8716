//! Full configuration validation.
//!
//! Each section has its own check. Invalid values are reset to their
//! defaults so the rest of a hand-edited file still takes effect, and every
//! problem is collected into a single `ConfigError`.

mod helpers;


use crate::schema::{CaptureConfig, PortalConfig, SiteConfig, WindowConfig};
use portal_common::ConfigError;

use helpers::{validate_origin, validate_range, validate_range_f64};

/// Reset every invalid value to its default.
///
/// Returns `Ok` when nothing had to change, otherwise a
/// `ConfigError::ValidationError` listing all problems found.
pub fn repair(config: &mut PortalConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    repair_site(&mut errors, config);
    repair_capture(&mut errors, config);
    repair_location(&mut errors, config);
    repair_window(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Run `check`, reporting whether it found anything.
fn failed(errors: &mut Vec<String>, check: impl FnOnce(&mut Vec<String>)) -> bool {
    let before = errors.len();
    check(errors);
    errors.len() > before
}

fn repair_site(errors: &mut Vec<String>, config: &mut PortalConfig) {
    let site = &mut config.site;
    let defaults = SiteConfig::default();
    if site.bundled.is_none() && failed(errors, |e| validate_origin(e, "site.url", &site.url)) {
        site.url = defaults.url;
    }
    site.allowed_origins
        .retain(|origin| !failed(errors, |e| validate_origin(e, "site.allowed_origins", origin)));
    if failed(errors, |e| {
        validate_range(e, "site.probe_timeout_secs", site.probe_timeout_secs, 1, 120)
    }) {
        site.probe_timeout_secs = defaults.probe_timeout_secs;
    }
}

fn repair_capture(errors: &mut Vec<String>, config: &mut PortalConfig) {
    let quality = config.capture.image_quality;
    if failed(errors, |e| {
        validate_range_f64(e, "capture.image_quality", quality, 0.0, 1.0)
    }) {
        config.capture.image_quality = CaptureConfig::default().image_quality;
    }
}

fn repair_location(errors: &mut Vec<String>, config: &mut PortalConfig) {
    let Some(fixed) = &config.location.fixed else {
        return;
    };
    let invalid = failed(errors, |e| {
        validate_range_f64(e, "location.fixed.latitude", fixed.latitude, -90.0, 90.0);
        validate_range_f64(
            e,
            "location.fixed.longitude",
            fixed.longitude,
            -180.0,
            180.0,
        );
        if let Some(accuracy) = fixed.accuracy {
            if accuracy.is_nan() || accuracy < 0.0 {
                e.push(format!(
                    "location.fixed.accuracy = {accuracy} must be non-negative"
                ));
            }
        }
    });
    // A half-valid position is worse than none.
    if invalid {
        config.location.fixed = None;
    }
}

fn repair_window(errors: &mut Vec<String>, config: &mut PortalConfig) {
    let window = &mut config.window;
    let defaults = WindowConfig::default();
    if failed(errors, |e| validate_range(e, "window.width", window.width, 200, 7680)) {
        window.width = defaults.width;
    }
    if failed(errors, |e| validate_range(e, "window.height", window.height, 200, 4320)) {
        window.height = defaults.height;
    }
}
