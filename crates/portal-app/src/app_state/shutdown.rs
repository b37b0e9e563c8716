//! Graceful shutdown: close the WebView, then stop the bridge runtime.

use std::time::Duration;

use super::core::PortalApp;

impl PortalApp {
    /// Order matters:
    /// 1. Drop the WebView so no more messages arrive
    /// 2. Drop the router and channels
    /// 3. Shut down the runtime (abandons pending pickers and prompts)
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        self.host = None;

        self.router = None;
        self.reply_rx = None;
        self.probe_rx = None;

        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        self.window = None;
        self.should_exit = true;

        tracing::info!("Graceful shutdown complete");
    }
}

#[cfg(test)]
mod tests {
    use crate::app_state::core::PortalApp;
    use portal_config::PortalConfig;

    #[test]
    fn shutdown_on_fresh_app_does_not_panic() {
        let mut app = PortalApp::new(PortalConfig::default());

        app.shutdown();

        assert!(app.host.is_none());
        assert!(app.router.is_none());
        assert!(app.reply_rx.is_none());
        assert!(app.tokio_runtime.is_none());
        assert!(app.should_exit);
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut app = PortalApp::new(PortalConfig::default());

        app.shutdown();
        app.shutdown();

        assert!(app.tokio_runtime.is_none());
        assert!(app.window.is_none());
    }

    #[test]
    fn shutdown_stops_the_runtime() {
        let mut app = PortalApp::new(PortalConfig::default());
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        rt.spawn(async {
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        });
        app.tokio_runtime = Some(rt);

        app.shutdown();

        assert!(app.tokio_runtime.is_none());
    }
}
