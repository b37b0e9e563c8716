//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use portal_webview::BackOutcome;

use super::core::PortalApp;
use super::init::window_bounds;
use super::input::{is_back_button, is_back_shortcut};

impl ApplicationHandler for PortalApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(ref host) = self.host {
                        if let Err(e) = host.set_bounds(window_bounds(size)) {
                            tracing::warn!("Failed to resize WebView: {e}");
                        }
                    }
                }
            }

            WindowEvent::Focused(true) => {
                if let Some(ref host) = self.host {
                    let _ = host.focus();
                }
            }

            WindowEvent::ModifiersChanged(new_modifiers) => {
                self.modifiers = new_modifiers.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_keyboard_input(event);
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } if is_back_button(button) => {
                self.handle_back();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}

impl PortalApp {
    fn handle_keyboard_input(&mut self, event: KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        if is_back_shortcut(&event.logical_key, self.modifiers) {
            self.handle_back();
        }
    }

    /// Hardware-back equivalent: go back in the page, or let it fall
    /// through when there is nothing to go back to.
    fn handle_back(&mut self) {
        let Some(host) = self.host.as_mut() else {
            return;
        };
        match host.go_back() {
            BackOutcome::Consumed => tracing::debug!("Back press consumed by page history"),
            BackOutcome::Propagate => tracing::debug!("Back press propagated: no page history"),
        }
    }
}
