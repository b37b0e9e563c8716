//! Event handling for the host, independent of the WebView itself.

use tracing::{debug, info, warn};

use crate::events::{HostEvent, PageLoadState};
use crate::history::{parse_navigation_state, BackOutcome, NavigationHistory};
use crate::state::HostState;

/// What the WebView wrapper must do in response to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    /// Hand this inbound message to the capability router.
    Route(String),
    /// A site page finished loading; evaluate the post-load scripts.
    InjectScripts,
}

#[derive(Debug, Default)]
pub struct HostController {
    state: HostState,
    history: NavigationHistory,
    site_requested: bool,
    title: String,
}

impl HostController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &HostState {
        &self.state
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Mark that the WebView was pointed at the site. Loads finishing
    /// before this belong to the loading page.
    pub fn begin_site_load(&mut self) {
        self.site_requested = true;
    }

    /// Enter the terminal error state. Returns `true` if this call did it.
    pub fn fail(&mut self, description: impl Into<String>) -> bool {
        let description = description.into();
        let failed = self.state.fail(description.clone());
        if failed {
            warn!(error = %description, "page failed to load");
        }
        failed
    }

    pub fn handle(&mut self, event: HostEvent) -> Option<HostAction> {
        match event {
            HostEvent::PageLoad {
                state: PageLoadState::Started,
                url,
            } => {
                debug!(url = %url, "page load started");
                None
            }
            HostEvent::PageLoad {
                state: PageLoadState::Finished,
                url,
            } => self.on_load_finished(&url),
            HostEvent::TitleChanged { title } => {
                self.title = title;
                None
            }
            HostEvent::NavigationBlocked { url } => {
                debug!(url = %url, "blocked navigation ignored");
                None
            }
            HostEvent::IpcMessage { body } => self.on_message(body),
        }
    }

    fn on_load_finished(&mut self, url: &str) -> Option<HostAction> {
        if self.state.error().is_some() || !self.site_requested {
            return None;
        }
        if url.is_empty() || url.starts_with("about:") || url.starts_with("data:") {
            return None;
        }
        if self.state.finish_load() {
            info!(url = %url, "site loaded");
        }
        self.history.record_load(url);
        self.state.set_can_go_back(self.history.can_go_back());
        Some(HostAction::InjectScripts)
    }

    fn on_message(&mut self, body: String) -> Option<HostAction> {
        if let Some(nav) = parse_navigation_state(&body) {
            if self.state.error().is_none() {
                self.history.apply(&nav);
                self.state.set_can_go_back(self.history.can_go_back());
                debug!(url = %nav.url, can_go_back = nav.can_go_back, "navigation state");
            }
            return None;
        }
        if self.state.error().is_some() {
            debug!(body_len = body.len(), "page is in error state; message dropped");
            return None;
        }
        Some(HostAction::Route(body))
    }

    /// Decide what a back press does. Nothing goes back from the error page.
    pub fn back_press(&mut self) -> BackOutcome {
        if self.state.error().is_some() {
            return BackOutcome::Propagate;
        }
        self.history.begin_back()
    }
}
