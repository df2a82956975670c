//! Drain bridge commands on the UI thread.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use winit::dpi::LogicalSize;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::Window;
use winrelay_bridge::WindowSize;
use winrelay_common::BridgeError;

use crate::dialogs::run_file_dialog;
use crate::scripts::{parse_viewport, VIEWPORT_SCRIPT};

use super::commands::{Reply, WindowCommand};
use super::core::WindowApp;

/// How often the event loop wakes to look for bridge commands.
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);

fn window_gone() -> BridgeError {
    BridgeError::Window("window has been destroyed".into())
}

fn logical_size(size: winit::dpi::PhysicalSize<u32>, scale: f64) -> WindowSize {
    let logical: LogicalSize<u32> = size.to_logical(scale);
    WindowSize::new(logical.width, logical.height)
}

impl WindowApp {
    /// Run queued commands and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        loop {
            let Some(command) = self.command_rx.as_ref().and_then(|rx| rx.try_recv().ok()) else {
                break;
            };
            tracing::debug!(?command, "Window command");
            self.handle_command(event_loop, command);
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    fn handle_command(&mut self, event_loop: &ActiveEventLoop, command: WindowCommand) {
        match command {
            WindowCommand::ShowDialog { request, reply } => {
                let result = self
                    .window
                    .as_deref()
                    .map(|window| run_file_dialog(window, &request))
                    .ok_or_else(window_gone);
                let _ = reply.send(result);
            }
            WindowCommand::OuterSize { reply } => {
                let result = self
                    .window
                    .as_deref()
                    .map(|window| logical_size(window.outer_size(), window.scale_factor()))
                    .ok_or_else(window_gone);
                let _ = reply.send(result);
            }
            WindowCommand::ViewportSize { reply } => self.query_viewport(reply),
            WindowCommand::SetOuterSize { size, reply } => {
                let result = self
                    .window
                    .as_deref()
                    .map(|window| set_outer_size(window, size))
                    .ok_or_else(window_gone);
                let _ = reply.send(result);
            }
            WindowCommand::SetTitle { title, reply } => {
                let result = self
                    .window
                    .as_deref()
                    .map(|window| window.set_title(&title))
                    .ok_or_else(window_gone);
                let _ = reply.send(result);
            }
            WindowCommand::Destroy { reply } => {
                tracing::info!("Destroying window");
                self.webview = None;
                self.window = None;
                let _ = reply.send(Ok(()));
                event_loop.exit();
            }
        }
    }

    /// Ask the page for its viewport. The answer arrives later through the
    /// script callback, which completes the reply.
    fn query_viewport(&self, reply: Reply<WindowSize>) {
        let Some(webview) = &self.webview else {
            let _ = reply.send(Err(window_gone()));
            return;
        };

        let slot = std::sync::Arc::new(Mutex::new(Some(reply)));
        let callback_slot = std::sync::Arc::clone(&slot);
        let evaluated = webview.evaluate_script_with_callback(VIEWPORT_SCRIPT, move |result| {
            let Some(reply) = callback_slot.lock().ok().and_then(|mut slot| slot.take()) else {
                return;
            };
            let size = parse_viewport(&result).ok_or_else(|| {
                BridgeError::Window(format!("unexpected viewport result: {result}"))
            });
            let _ = reply.send(size);
        });

        if let Err(e) = evaluated {
            if let Some(reply) = slot.lock().ok().and_then(|mut slot| slot.take()) {
                let _ = reply.send(Err(BridgeError::Window(e.to_string())));
            }
        }
    }
}

/// winit only sets the inner size, so the decoration size measured now is
/// taken off the requested outer size.
fn set_outer_size(window: &Window, size: WindowSize) {
    let scale = window.scale_factor();
    let outer = logical_size(window.outer_size(), scale);
    let inner = logical_size(window.inner_size(), scale);
    let target = LogicalSize::new(
        size.width.saturating_sub(outer.width.saturating_sub(inner.width)),
        size.height.saturating_sub(outer.height.saturating_sub(inner.height)),
    );
    let _ = window.request_inner_size(target);
}
