//! Shutdown after the event loop has been left.

use std::time::Duration;

use winrelay_common::BridgeError;

use super::core::{WindowApp, BRIDGE_FAILURE_EXIT_CODE};

/// Extra time granted to the bridge on top of its close timeout.
const BRIDGE_JOIN_GRACE: Duration = Duration::from_secs(1);

impl WindowApp {
    /// Let the bridge finish closing its channel, then stop the runtime.
    ///
    /// Order matters:
    /// 1. Drop the command receiver so pending bridge requests fail fast
    /// 2. Cancel the bridge (no-op if it is already closing)
    /// 3. Wait for the bridge task, bounded by the close timeout
    /// 4. Shut down the tokio runtime
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Shutting down");

        self.command_rx = None;
        self.webview = None;
        self.window = None;

        if let Some(bridge) = &self.bridge {
            bridge.cancel();
        }

        let Some(rt) = self.tokio_runtime.take() else {
            return;
        };

        if let Some(task) = self.bridge_task.take() {
            let wait = self.options.close_timeout + BRIDGE_JOIN_GRACE;
            match rt.block_on(async { tokio::time::timeout(wait, task).await }) {
                Ok(Ok(result)) => self.record_bridge_result(result),
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "Bridge task failed");
                    self.exit_code = BRIDGE_FAILURE_EXIT_CODE;
                }
                Err(_) => tracing::warn!("Bridge did not finish closing in time"),
            }
        }

        rt.shutdown_timeout(self.options.close_timeout);
        tracing::info!("Shutdown complete");
    }

    fn record_bridge_result(&mut self, result: Result<winrelay_bridge::CloseReason, BridgeError>) {
        match result {
            Ok(reason) => tracing::info!(?reason, "Extension bridge closed"),
            Err(e) => {
                tracing::error!(error = %e, "Extension bridge failed");
                self.exit_code = BRIDGE_FAILURE_EXIT_CODE;
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use winrelay_bridge::Bridge;
    use winrelay_common::{BridgeError, LaunchFlags};

    use crate::app_state::commands::ProxyWindow;
    use crate::app_state::core::WindowApp;
    use crate::cli::WindowOptions;

    fn app() -> WindowApp {
        WindowApp::new(WindowOptions {
            url: "http://localhost:9000/".into(),
            width: 640,
            height: 480,
            title: String::new(),
            flags: LaunchFlags::empty(),
            bridge_path: "bridge".into(),
            close_timeout: Duration::from_millis(200),
        })
    }

    #[test]
    fn shutdown_on_fresh_app_does_not_panic() {
        let mut app = app();
        app.shutdown();
        assert_eq!(app.exit_code(), 0);
        assert!(app.command_rx.is_none());
        assert!(app.tokio_runtime.is_none());
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut app = app();
        app.shutdown();
        app.shutdown();
        assert_eq!(app.exit_code(), 0);
    }

    #[test]
    fn shutdown_cancels_a_connecting_bridge() {
        let mut app = app();
        // Accepts TCP through the backlog but never answers the handshake.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("ws://{}/bridge", listener.local_addr().unwrap());

        let rt = tokio::runtime::Runtime::new().unwrap();
        let proxy = ProxyWindow::new(app.command_tx.clone());
        let (mut bridge, handle) = Bridge::new(endpoint, proxy, Duration::from_millis(200));
        app.bridge_task = Some(rt.spawn(async move { bridge.run().await }));
        app.bridge = Some(handle);
        app.tokio_runtime = Some(rt);

        let started = Instant::now();
        app.shutdown();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(app.exit_code(), 0);
        assert!(app.bridge.as_ref().unwrap().is_cancelled());
        drop(listener);
    }

    #[test]
    fn bridge_failure_sets_exit_code() {
        let mut app = app();
        app.record_bridge_result(Err(BridgeError::Connect("refused".into())));
        assert_eq!(app.exit_code(), 1);
    }
}
