//! The `wry` WebView that shows the site.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wry::raw_window_handle;
use wry::{WebView, WebViewBuilder};

use crate::content::{ContentProvider, SCHEME};
use crate::controller::{HostAction, HostController};
use crate::events::{HostEvent, PageLoadState};
use crate::history::BackOutcome;
use crate::navigation::NavigationPolicy;
use crate::pages::{error_page, loading_page};
use crate::scripts::{
    js_post_message, CONSOLE_FORWARD_SCRIPT, HISTORY_BACK_SCRIPT, NATIVE_BRIDGE_SCRIPT,
    PRELOAD_SCRIPT,
};
use crate::source::ContentSource;

/// Settings for building the host WebView.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub source: ContentSource,
    pub user_agent: Option<String>,
    /// Enable the inspector.
    pub devtools: bool,
    /// Mirror page console output into the host log.
    pub forward_console: bool,
    /// Origins allowed in addition to the site's own.
    pub allowed_origins: Vec<String>,
}

type EventSink = Arc<Mutex<Vec<HostEvent>>>;

pub struct WebViewHost {
    webview: WebView,
    events: EventSink,
    controller: HostController,
    source: ContentSource,
    forward_console: bool,
}

impl WebViewHost {
    /// Create the WebView as a child of `window`, showing the loading page.
    pub fn new<W: raw_window_handle::HasWindowHandle>(
        window: &W,
        bounds: wry::Rect,
        config: HostConfig,
    ) -> Result<Self, wry::Error> {
        let events: EventSink = Arc::new(Mutex::new(Vec::new()));
        let policy = NavigationPolicy::new(
            config.source.remote_url(),
            config.allowed_origins.iter().map(String::as_str),
        );

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(config.devtools)
            .with_clipboard(true)
            .with_initialization_script(PRELOAD_SCRIPT)
            .with_html(loading_page());

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = Self::attach_ipc_handler(builder, Arc::clone(&events));
        builder = Self::attach_page_load_handler(builder, Arc::clone(&events));
        builder = Self::attach_title_handler(builder, Arc::clone(&events));
        builder = Self::attach_navigation_handler(builder, Arc::clone(&events), policy);

        if let Some(dir) = config.source.bundle_dir() {
            let provider = Arc::new(ContentProvider::new(dir));
            builder = builder.with_custom_protocol(SCHEME.to_string(), move |_id, request| {
                provider.respond(&request.uri().to_string())
            });
        }

        let webview = builder.build_as_child(window)?;
        debug!(source = ?config.source, "host WebView created");

        Ok(Self {
            webview,
            events,
            controller: HostController::new(),
            source: config.source,
            forward_console: config.forward_console,
        })
    }

    fn attach_ipc_handler<'a>(builder: WebViewBuilder<'a>, events: EventSink) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();
            debug!(body_len = body.len(), "message from page");
            if let Ok(mut evts) = events.lock() {
                evts.push(HostEvent::IpcMessage { body });
            }
        })
    }

    fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: EventSink,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            if let Ok(mut evts) = events.lock() {
                evts.push(HostEvent::PageLoad { state, url });
            }
        })
    }

    fn attach_title_handler<'a>(builder: WebViewBuilder<'a>, events: EventSink) -> WebViewBuilder<'a> {
        builder.with_document_title_changed_handler(move |title| {
            if let Ok(mut evts) = events.lock() {
                evts.push(HostEvent::TitleChanged { title });
            }
        })
    }

    fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: EventSink,
        policy: NavigationPolicy,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            if policy.is_allowed(&url) {
                return true;
            }
            warn!(url = %url, "navigation blocked: URL not in allowlist");
            if let Ok(mut evts) = events.lock() {
                evts.push(HostEvent::NavigationBlocked { url });
            }
            false
        })
    }

    pub fn title(&self) -> &str {
        self.controller.title()
    }

    /// Point the WebView at the site, or fail right away if the source is
    /// known to be unusable.
    pub fn show_site(&mut self) -> Result<(), wry::Error> {
        if let Some(description) = self.source.precheck() {
            return self.fail(description);
        }
        if self.controller.state().error().is_some() {
            return Ok(());
        }
        let url = self.source.start_url();
        debug!(url = %url, "loading site");
        self.controller.begin_site_load();
        self.webview.load_url(&url)
    }

    /// Replace the view with the error page. Terminal.
    pub fn fail(&mut self, description: impl Into<String>) -> Result<(), wry::Error> {
        let description = description.into();
        if !self.controller.fail(description.clone()) {
            return Ok(());
        }
        self.webview.load_html(&error_page(&description))
    }

    /// Process pending WebView events. Returns the inbound bridge messages
    /// to route, in arrival order.
    pub fn poll(&mut self) -> Vec<String> {
        let drained = match self.events.lock() {
            Ok(mut evts) => std::mem::take(&mut *evts),
            Err(_) => Vec::new(),
        };

        let mut inbound = Vec::new();
        for event in drained {
            match self.controller.handle(event) {
                Some(HostAction::Route(body)) => inbound.push(body),
                Some(HostAction::InjectScripts) => self.inject_post_load_scripts(),
                None => {}
            }
        }
        inbound
    }

    fn inject_post_load_scripts(&self) {
        if let Err(e) = self.webview.evaluate_script(NATIVE_BRIDGE_SCRIPT) {
            warn!(error = %e, "failed to inject NativeBridge");
        }
        if self.forward_console {
            if let Err(e) = self.webview.evaluate_script(CONSOLE_FORWARD_SCRIPT) {
                warn!(error = %e, "failed to inject console forwarding");
            }
        }
    }

    /// Deliver a serialized bridge reply to page listeners.
    pub fn post_message(&self, json: &str) -> Result<(), wry::Error> {
        if self.controller.state().error().is_some() {
            debug!("page is gone; reply dropped");
            return Ok(());
        }
        self.webview.evaluate_script(&js_post_message(json))
    }

    /// Handle a back press: navigate back in the page if possible.
    pub fn go_back(&mut self) -> BackOutcome {
        let outcome = self.controller.back_press();
        if outcome == BackOutcome::Consumed {
            if let Err(e) = self.webview.evaluate_script(HISTORY_BACK_SCRIPT) {
                warn!(error = %e, "history.back() failed");
            }
        }
        outcome
    }

    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }
}
