//! Back-navigation tracking.
//!
//! Two sources feed the history: full page loads observed by the host, and
//! `navigation-state` messages posted by the preload script whenever the
//! page changes its in-page history (`pushState`, `popstate`, ...).

use serde::Deserialize;

/// Host-internal message tag used by the preload script.
pub const NAVIGATION_STATE_TAG: &str = "navigation-state";

/// In-page navigation state as reported by the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub url: String,
    #[serde(default)]
    pub can_go_back: bool,
}

#[derive(Deserialize)]
struct NavigationEnvelope {
    #[serde(rename = "type")]
    kind: String,
    data: Option<NavigationState>,
}

/// Recognize a `navigation-state` message. Anything else yields `None`
/// and should go to the capability router.
pub fn parse_navigation_state(raw: &str) -> Option<NavigationState> {
    let envelope: NavigationEnvelope = serde_json::from_str(raw).ok()?;
    if envelope.kind != NAVIGATION_STATE_TAG {
        return None;
    }
    envelope.data
}

/// Result of a back press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// The browser navigated back; the event is handled.
    Consumed,
    /// Nothing to go back to; let the app handle the event.
    Propagate,
}

#[derive(Debug, Clone, Default)]
pub struct NavigationHistory {
    /// URLs of full page loads, oldest first.
    loads: Vec<String>,
    /// Whether the current document has in-page entries behind it.
    in_page_back: bool,
    /// A back press left the current document; the next load is its target.
    pending_back: bool,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished full page load.
    ///
    /// Only a load following [`begin_back`](Self::begin_back) onto the
    /// entry just behind the current one pops the stack. A link to an
    /// earlier URL is a new entry. Reloads of the current URL are ignored.
    pub fn record_load(&mut self, url: &str) {
        // A fresh document reports its own in-page state after it boots.
        self.in_page_back = false;
        let pending_back = std::mem::take(&mut self.pending_back);

        let len = self.loads.len();
        if self.loads.last().is_some_and(|last| last == url) {
            return;
        }
        if pending_back && len >= 2 && self.loads[len - 2] == url {
            self.loads.pop();
        } else {
            self.loads.push(url.to_string());
        }
    }

    /// Apply a `navigation-state` report from the page.
    pub fn apply(&mut self, state: &NavigationState) {
        self.in_page_back = state.can_go_back;
    }

    pub fn can_go_back(&self) -> bool {
        self.in_page_back || self.loads.len() > 1
    }

    /// Decide what a back press does.
    pub fn back_outcome(&self) -> BackOutcome {
        if self.can_go_back() {
            BackOutcome::Consumed
        } else {
            BackOutcome::Propagate
        }
    }

    /// Handle a back press. When it leaves the current document, the next
    /// full load is expected to be the previous entry.
    pub fn begin_back(&mut self) -> BackOutcome {
        let outcome = self.back_outcome();
        if outcome == BackOutcome::Consumed && !self.in_page_back {
            self.pending_back = true;
        }
        outcome
    }
}
