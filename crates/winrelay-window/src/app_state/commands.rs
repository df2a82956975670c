//! Bridge requests marshalled onto the UI thread.
//!
//! The bridge runs on the tokio runtime; winit and wry objects live on the
//! UI thread. [`ProxyWindow`] turns each [`NativeWindow`] call into a
//! [`WindowCommand`] and waits on a oneshot for the event loop's answer.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::oneshot;
use winrelay_bridge::{DialogRequest, NativeWindow, WindowSize};
use winrelay_common::BridgeError;

pub type Reply<T> = oneshot::Sender<Result<T, BridgeError>>;

/// How long the page gets to answer the viewport script.
pub const VIEWPORT_TIMEOUT: Duration = Duration::from_secs(2);

pub enum WindowCommand {
    ShowDialog {
        request: DialogRequest,
        reply: Reply<Vec<PathBuf>>,
    },
    OuterSize {
        reply: Reply<WindowSize>,
    },
    ViewportSize {
        reply: Reply<WindowSize>,
    },
    SetOuterSize {
        size: WindowSize,
        reply: Reply<()>,
    },
    SetTitle {
        title: String,
        reply: Reply<()>,
    },
    Destroy {
        reply: Reply<()>,
    },
}

impl std::fmt::Debug for WindowCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShowDialog { request, .. } => f.debug_tuple("ShowDialog").field(&request.kind).finish(),
            Self::OuterSize { .. } => f.write_str("OuterSize"),
            Self::ViewportSize { .. } => f.write_str("ViewportSize"),
            Self::SetOuterSize { size, .. } => f.debug_tuple("SetOuterSize").field(size).finish(),
            Self::SetTitle { title, .. } => f.debug_tuple("SetTitle").field(title).finish(),
            Self::Destroy { .. } => f.write_str("Destroy"),
        }
    }
}

/// [`NativeWindow`] implementation handed to the bridge.
pub struct ProxyWindow {
    tx: Sender<WindowCommand>,
    viewport_timeout: Duration,
}

impl ProxyWindow {
    pub fn new(tx: Sender<WindowCommand>) -> Self {
        Self {
            tx,
            viewport_timeout: VIEWPORT_TIMEOUT,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(Reply<T>) -> WindowCommand) -> Result<T, BridgeError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(command(reply))
            .map_err(|_| BridgeError::Window("window event loop has stopped".into()))?;
        rx.await
            .map_err(|_| BridgeError::Window("window dropped the request".into()))?
    }
}

#[async_trait]
impl NativeWindow for ProxyWindow {
    async fn show_dialog(&mut self, request: DialogRequest) -> Result<Vec<PathBuf>, BridgeError> {
        self.request(|reply| WindowCommand::ShowDialog { request, reply }).await
    }

    async fn outer_size(&mut self) -> Result<WindowSize, BridgeError> {
        self.request(|reply| WindowCommand::OuterSize { reply }).await
    }

    /// The answer comes from a script callback, which a stalled or
    /// navigating page may never run.
    async fn viewport_size(&mut self) -> Result<WindowSize, BridgeError> {
        let request = self.request(|reply| WindowCommand::ViewportSize { reply });
        tokio::time::timeout(self.viewport_timeout, request)
            .await
            .map_err(|_| BridgeError::Window("page did not report its viewport".into()))?
    }

    async fn set_outer_size(&mut self, size: WindowSize) -> Result<(), BridgeError> {
        self.request(|reply| WindowCommand::SetOuterSize { size, reply }).await
    }

    async fn set_title(&mut self, title: &str) -> Result<(), BridgeError> {
        let title = title.to_string();
        self.request(|reply| WindowCommand::SetTitle { title, reply }).await
    }

    async fn destroy(&mut self) {
        if let Err(e) = self.request(|reply| WindowCommand::Destroy { reply }).await {
            tracing::debug!(error = %e, "Window already gone");
        }
    }
}
