//! Draining WebView events, bridge replies, and the site probe.

use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::PortalApp;
use super::types::POLL_INTERVAL;

impl PortalApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_probe();
            self.poll_host();
            self.poll_replies();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    /// Load the site or show the error page once the probe has answered.
    fn poll_probe(&mut self) {
        let Some(ref rx) = self.probe_rx else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err("The site check was interrupted.".to_string()),
        };
        self.probe_rx = None;

        let Some(ref mut host) = self.host else {
            return;
        };
        let outcome = match result {
            Ok(()) => host.show_site(),
            Err(description) => host.fail(description),
        };
        if let Err(e) = outcome {
            tracing::error!("Failed to update WebView content: {e}");
        }
    }

    /// Hand inbound page messages to the router, each on its own task.
    fn poll_host(&mut self) {
        let Some(ref mut host) = self.host else {
            return;
        };
        let inbound = host.poll();
        if let Some(window) = &self.window {
            let title = host.title();
            if !title.is_empty() && window.title() != title {
                window.set_title(title);
            }
        }

        let Some(ref router) = self.router else {
            return;
        };
        for raw in inbound {
            router.on_inbound_message(raw);
        }
    }

    /// Deliver replies produced by finished bridge tasks.
    fn poll_replies(&mut self) {
        let (Some(rx), Some(host)) = (&self.reply_rx, &self.host) else {
            return;
        };
        while let Ok(reply) = rx.try_recv() {
            if let Err(e) = host.post_message(&reply.to_json()) {
                tracing::warn!(kind = reply.kind(), "Failed to deliver reply: {e}");
            }
        }
    }
}
