//! Window creation, bridge startup, and host WebView setup.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use portal_bridge::{
    request_startup_permissions, CapabilityRouter, DocumentOptions, ImageOptions, Platform,
    ReplySink, RouterOptions,
};
use portal_common::PortalError;
use portal_config::schema::SiteConfig;
use portal_config::PortalConfig;
use portal_platform::DesktopPlatform;
use portal_webview::{probe_site, ContentSource, HostConfig, WebViewHost};

use super::core::PortalApp;
use super::types::RUNTIME_WORKERS;

impl PortalApp {
    /// Create the window, the bridge, and the host WebView.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        match self.try_initialize(event_loop) {
            Ok(()) => {
                tracing::info!("Window and WebView initialized");
                true
            }
            Err(e) => {
                tracing::error!("Initialization failed: {e}");
                false
            }
        }
    }

    fn try_initialize(&mut self, event_loop: &ActiveEventLoop) -> portal_common::Result<()> {
        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width as f64,
                self.config.window.height as f64,
            ));
        let window = event_loop
            .create_window(attrs)
            .map(Arc::new)
            .map_err(|e| PortalError::Other(format!("failed to create window: {e}")))?;

        self.start_bridge()?;

        let host_config = host_config(&self.config);
        let remote = host_config.source.remote_url().map(str::to_string);
        let bounds = window_bounds(window.inner_size());
        let mut host = WebViewHost::new(window.as_ref(), bounds, host_config)
            .map_err(|e| PortalError::WebView(e.to_string()))?;

        match remote {
            Some(url) if self.config.site.probe => self.start_probe(url),
            _ => host
                .show_site()
                .map_err(|e| PortalError::WebView(e.to_string()))?,
        }

        self.host = Some(host);
        self.window = Some(window);
        Ok(())
    }

    /// Start the runtime, the capability router, and the startup
    /// permission requests.
    fn start_bridge(&mut self) -> portal_common::Result<()> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(RUNTIME_WORKERS)
            .thread_name("portal-bridge")
            .enable_all()
            .build()?;

        let platform = Arc::new(match DesktopPlatform::new(&self.config) {
            Ok(platform) => platform,
            Err(e) => {
                let fallback = std::env::temp_dir().join("portal-picked");
                tracing::warn!(
                    fallback = %fallback.display(),
                    "No cache directory for picked files ({e}); using temp dir"
                );
                DesktopPlatform::with_picked_dir(&self.config, fallback)
            }
        });
        tracing::info!(platform = platform.platform_name(), "Capability platform ready");

        let (reply_tx, reply_rx) = mpsc::channel();
        let sink: Arc<dyn ReplySink> = Arc::new(reply_tx);
        let router = CapabilityRouter::new(
            Arc::clone(&platform) as Arc<dyn Platform>,
            sink,
            runtime.handle().clone(),
        )
        .with_options(router_options(&self.config));

        // Fire and forget: outcomes are only logged.
        let startup = Arc::clone(&platform);
        runtime.spawn(async move {
            request_startup_permissions(startup.as_ref()).await;
        });

        self.router = Some(Arc::new(router));
        self.reply_rx = Some(reply_rx);
        self.tokio_runtime = Some(runtime);
        Ok(())
    }

    /// Check the remote site in the background; the result is picked up by
    /// the poll loop.
    fn start_probe(&mut self, url: String) {
        let Some(runtime) = &self.tokio_runtime else {
            return;
        };
        let timeout = Duration::from_secs(u64::from(self.config.site.probe_timeout_secs));
        let user_agent = self.config.site.user_agent.clone();
        let (tx, rx) = mpsc::channel();
        runtime.spawn(async move {
            let result = probe_site(&url, timeout, user_agent.as_deref()).await;
            let _ = tx.send(result);
        });
        self.probe_rx = Some(rx);
    }
}

/// Where the site comes from. A bundled document wins over the URL.
pub(super) fn content_source(site: &SiteConfig) -> ContentSource {
    match &site.bundled {
        Some(path) => ContentSource::Bundled { path: path.clone() },
        None => ContentSource::Remote {
            url: site.url.clone(),
        },
    }
}

pub(super) fn host_config(config: &PortalConfig) -> HostConfig {
    HostConfig {
        source: content_source(&config.site),
        user_agent: config.site.user_agent.clone(),
        devtools: config.dev.devtools,
        forward_console: config.dev.forward_console,
        allowed_origins: config.site.allowed_origins.clone(),
    }
}

pub(super) fn router_options(config: &PortalConfig) -> RouterOptions {
    RouterOptions {
        image: ImageOptions {
            quality: config.capture.image_quality,
        },
        document: DocumentOptions::default(),
        ..RouterOptions::default()
    }
}

/// The WebView fills the whole window.
pub(super) fn window_bounds(size: PhysicalSize<u32>) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Physical(wry::dpi::PhysicalPosition::new(0, 0)),
        size: wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(size.width, size.height)),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use portal_bridge::Accuracy;

    use super::*;

    #[test]
    fn remote_source_by_default() {
        let config = PortalConfig::default();
        assert_eq!(
            content_source(&config.site),
            ContentSource::Remote {
                url: "https://example.com".into()
            }
        );
    }

    #[test]
    fn bundled_source_wins() {
        let mut config = PortalConfig::default();
        config.site.bundled = Some(PathBuf::from("site/index.html"));
        assert_eq!(
            content_source(&config.site),
            ContentSource::Bundled {
                path: PathBuf::from("site/index.html")
            }
        );
    }

    #[test]
    fn router_options_follow_capture_config() {
        let mut config = PortalConfig::default();
        config.capture.image_quality = 0.5;
        let options = router_options(&config);
        assert_eq!(options.image.quality, 0.5);
        assert_eq!(options.document.mime_types, vec!["*/*".to_string()]);
        assert!(options.document.copy_to_cache);
        assert_eq!(options.accuracy, Accuracy::High);
    }

    #[test]
    fn host_config_carries_dev_flags() {
        let mut config = PortalConfig::default();
        config.dev.devtools = true;
        config.dev.forward_console = false;
        config.site.allowed_origins = vec!["https://accounts.example.com".into()];
        let host = host_config(&config);
        assert!(host.devtools);
        assert!(!host.forward_console);
        assert_eq!(host.allowed_origins.len(), 1);
    }

    #[test]
    fn bounds_cover_the_window() {
        let rect = window_bounds(PhysicalSize::new(800, 600));
        match rect.size {
            wry::dpi::Size::Physical(size) => {
                assert_eq!((size.width, size.height), (800, 600));
            }
            other => panic!("unexpected size {other:?}"),
        }
    }
}
