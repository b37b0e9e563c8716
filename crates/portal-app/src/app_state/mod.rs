//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window, the host WebView, the tokio runtime that
//! runs bridge requests, and the channels that bring results back.

mod core;
mod event_handler;
mod init;
mod input;
mod polling;
mod shutdown;
mod types;

pub use core::PortalApp;
