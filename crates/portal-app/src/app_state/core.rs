//! PortalApp struct definition and constructor.

use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Instant;

use winit::window::Window;

use portal_bridge::{BridgeResponse, CapabilityRouter};
use portal_config::PortalConfig;
use portal_webview::WebViewHost;

use super::types::ProbeResult;

pub struct PortalApp {
    pub(super) config: PortalConfig,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) host: Option<WebViewHost>,

    // Bridge
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,
    pub(super) router: Option<Arc<CapabilityRouter>>,
    pub(super) reply_rx: Option<Receiver<BridgeResponse>>,
    pub(super) probe_rx: Option<Receiver<ProbeResult>>,

    // Modifier tracking (winit sends these separately)
    pub(super) modifiers: winit::keyboard::ModifiersState,

    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl PortalApp {
    pub fn new(config: PortalConfig) -> Self {
        Self {
            config,
            window: None,
            host: None,
            tokio_runtime: None,
            router: None,
            reply_rx: None,
            probe_rx: None,
            modifiers: winit::keyboard::ModifiersState::empty(),
            should_exit: false,
            last_poll: Instant::now(),
        }
    }
}
