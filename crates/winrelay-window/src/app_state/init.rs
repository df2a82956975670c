//! Window creation, webview setup and bridge start-up.

use std::sync::Arc;

use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window, WindowAttributes, WindowLevel};
use winrelay_bridge::{bridge_endpoint, Bridge};
use winrelay_common::LaunchFlags;
use wry::{WebView, WebViewBuilder};

use crate::cli::WindowOptions;
use crate::scripts::{init_scripts, DRAG_MESSAGE};

use super::commands::ProxyWindow;
use super::core::{WindowApp, BRIDGE_FAILURE_EXIT_CODE};

/// Translate launch flags into winit window attributes.
pub(super) fn window_attributes(options: &WindowOptions) -> WindowAttributes {
    let flags = options.flags;
    let mut attrs = WindowAttributes::default()
        .with_title(options.window_title())
        .with_inner_size(LogicalSize::new(options.width as f64, options.height as f64))
        .with_resizable(!flags.contains(LaunchFlags::NO_RESIZE))
        .with_visible(!flags.contains(LaunchFlags::HIDDEN))
        .with_decorations(!flags.contains(LaunchFlags::FRAMELESS))
        .with_transparent(flags.contains(LaunchFlags::TRANSPARENT));

    if flags.contains(LaunchFlags::FULLSCREEN) {
        attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }
    if flags.contains(LaunchFlags::ON_TOP) {
        attrs = attrs.with_window_level(WindowLevel::AlwaysOnTop);
    }
    attrs
}

impl WindowApp {
    /// Create the window, the webview and the bridge.
    /// Returns `false` if start-up failed and the event loop should exit.
    pub(super) fn initialize(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let window = match event_loop.create_window(window_attributes(&self.options)) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };
        if self.options.flags.contains(LaunchFlags::MINIMIZED) {
            window.set_minimized(true);
        }

        let webview = match self.build_webview(&window) {
            Ok(wv) => wv,
            Err(e) => {
                tracing::error!("Failed to create webview: {e}");
                return false;
            }
        };

        self.window = Some(window);
        self.webview = Some(webview);
        tracing::info!(
            url = %self.options.url,
            flags = ?self.options.flags.names(),
            "Window created"
        );

        self.start_bridge()
    }

    fn build_webview(&self, window: &Arc<Window>) -> Result<WebView, wry::Error> {
        let flags = self.options.flags;
        let mut builder = WebViewBuilder::new()
            .with_url(&self.options.url)
            .with_transparent(flags.contains(LaunchFlags::TRANSPARENT));

        for script in init_scripts(flags) {
            builder = builder.with_initialization_script(script);
        }

        if flags.contains(LaunchFlags::EASY_DRAG) {
            let drag_target = Arc::clone(window);
            builder = builder.with_ipc_handler(move |request| {
                if request.body().as_str() != DRAG_MESSAGE {
                    tracing::debug!(body_len = request.body().len(), "Ignoring IPC message");
                    return;
                }
                if let Err(e) = drag_target.drag_window() {
                    tracing::debug!(error = %e, "Window drag refused");
                }
            });
        }

        builder.build(window.as_ref())
    }

    /// Spawn the extension bridge on a fresh tokio runtime.
    fn start_bridge(&mut self) -> bool {
        let endpoint = match bridge_endpoint(&self.options.url, &self.options.bridge_path) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                tracing::error!(error = %e, "Cannot derive bridge endpoint");
                self.exit_code = BRIDGE_FAILURE_EXIT_CODE;
                return false;
            }
        };

        let runtime = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!(error = %e, "Failed to start tokio runtime");
                self.exit_code = BRIDGE_FAILURE_EXIT_CODE;
                return false;
            }
        };

        let proxy = ProxyWindow::new(self.command_tx.clone());
        let (mut bridge, handle) = Bridge::new(endpoint, proxy, self.options.close_timeout);
        let task = runtime.spawn(async move { bridge.run().await });

        self.bridge = Some(handle);
        self.bridge_task = Some(task);
        self.tokio_runtime = Some(runtime);
        true
    }
}
