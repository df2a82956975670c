//! WindowApp struct definition and constructor.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use winit::window::Window;
use winrelay_bridge::{BridgeHandle, CloseReason};
use winrelay_common::BridgeError;
use wry::WebView;

use crate::cli::WindowOptions;

use super::commands::WindowCommand;

pub(super) type BridgeTask = JoinHandle<Result<CloseReason, BridgeError>>;

/// Process exit code when the bridge stops with an error.
pub(super) const BRIDGE_FAILURE_EXIT_CODE: i32 = 1;

pub struct WindowApp {
    pub(super) options: WindowOptions,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) webview: Option<WebView>,
    pub(super) initialized: bool,

    // Extension bridge
    pub(super) tokio_runtime: Option<Runtime>,
    pub(super) bridge: Option<BridgeHandle>,
    pub(super) bridge_task: Option<BridgeTask>,
    pub(super) command_tx: Sender<WindowCommand>,
    pub(super) command_rx: Option<Receiver<WindowCommand>>,

    pub(super) exit_code: i32,
}

impl WindowApp {
    pub fn new(options: WindowOptions) -> Self {
        let (command_tx, command_rx) = mpsc::channel();
        Self {
            options,
            window: None,
            webview: None,
            initialized: false,
            tokio_runtime: None,
            bridge: None,
            bridge_task: None,
            command_tx,
            command_rx: Some(command_rx),
            exit_code: 0,
        }
    }

    /// Exit code for the process once the event loop has returned.
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }
}
