//! Embedded browser host for the Portal shell.
//!
//! Wraps the `wry` crate to provide:
//! - A single full-window WebView showing the site (remote or bundled)
//! - Loading and error pages with a `Loading -> Loaded | Error` state machine
//! - Injected scripts: notification stub, `NativeBridge`, console forwarding
//! - Delivery of bridge replies as `MessageEvent`s
//! - Back navigation tracking and a navigation allowlist
//! - A `portal://` custom protocol for bundled content

pub mod content;
pub mod controller;
pub mod events;
pub mod history;
pub mod host;
pub mod navigation;
pub mod pages;
pub mod scripts;
pub mod source;
pub mod state;

pub use content::ContentProvider;
pub use controller::{HostAction, HostController};
pub use events::{HostEvent, PageLoadState};
pub use history::{parse_navigation_state, BackOutcome, NavigationHistory, NavigationState};
pub use host::{HostConfig, WebViewHost};
pub use navigation::NavigationPolicy;
pub use source::{probe_site, ContentSource};
pub use state::{HostState, LoadPhase};
