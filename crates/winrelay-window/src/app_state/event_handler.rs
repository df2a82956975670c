//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;
use winrelay_common::LaunchFlags;

use crate::dialogs::confirm_close;

use super::core::WindowApp;

impl ApplicationHandler for WindowApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        if !self.initialize(event_loop) {
            if self.exit_code == 0 {
                self.exit_code = 1;
            }
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            tracing::info!("Window close requested");
            self.close_requested();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.poll_and_schedule(event_loop);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

impl WindowApp {
    /// Confirm if asked to, then cancel the bridge and end the process
    /// without waiting for the channel to close.
    fn close_requested(&mut self) {
        if self.options.flags.contains(LaunchFlags::CONFIRM_CLOSE) {
            if let Some(window) = self.window.as_deref() {
                if !confirm_close(window, self.options.window_title()) {
                    tracing::info!("Close cancelled by user");
                    return;
                }
            }
        }

        if let Some(bridge) = &self.bridge {
            bridge.cancel();
        }
        std::process::exit(0);
    }
}
