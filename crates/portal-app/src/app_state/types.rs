use std::time::Duration;

/// How often the event loop drains WebView events and bridge replies.
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(8);

/// Worker threads for the bridge runtime.
pub(super) const RUNTIME_WORKERS: usize = 2;

/// Outcome of the remote site reachability check.
pub(super) type ProbeResult = Result<(), String>;
