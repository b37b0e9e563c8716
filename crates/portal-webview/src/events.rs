//! Events raised by the WebView's callbacks.

use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded.
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by the host WebView, drained by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Page load state changed. Carries the URL.
    PageLoad { state: PageLoadState, url: String },
    /// Document title changed.
    TitleChanged { title: String },
    /// A string message posted by page script through `window.ipc`.
    IpcMessage { body: String },
    /// A navigation was refused by the allowlist.
    NavigationBlocked { url: String },
}
