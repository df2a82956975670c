//! Control channel state machine.
//!
//! `Connecting` opens the WebSocket, `Running` services exactly one receive
//! at a time, `Closing` tears the window down and closes the channel. Window
//! close callbacks only reach the loop through [`BridgeHandle::cancel`].

use std::time::Duration;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use winrelay_common::BridgeError;

use crate::dispatch::dispatch;
use crate::protocol::{ExtensionResponse, Inbound, Outbound};
use crate::window::{NativeWindow, WindowHandle};

/// Default bounded wait for the channel close handshake.
pub const DEFAULT_CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Connecting,
    Running,
    Closing,
    Closed,
}

/// Why the loop stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Cancelled,
    PeerClosed,
}

/// Cancellation handle for a running [`Bridge`].
#[derive(Debug, Clone)]
pub struct BridgeHandle {
    token: CancellationToken,
}

impl BridgeHandle {
    /// Ask the bridge to close. Safe to call from any thread, any number of
    /// times.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

pub struct Bridge<W> {
    endpoint: String,
    close_timeout: Duration,
    window: WindowHandle<W>,
    token: CancellationToken,
    state: BridgeState,
}

enum Step {
    Continue,
    Stop(CloseReason),
}

impl<W: NativeWindow> Bridge<W> {
    /// Create a bridge that will connect to `endpoint` and own `window`.
    pub fn new(endpoint: impl Into<String>, window: W, close_timeout: Duration) -> (Self, BridgeHandle) {
        let token = CancellationToken::new();
        let handle = BridgeHandle {
            token: token.clone(),
        };
        let bridge = Self {
            endpoint: endpoint.into(),
            close_timeout,
            window: WindowHandle::new(window),
            token,
            state: BridgeState::Connecting,
        };
        (bridge, handle)
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    pub fn window(&self) -> &WindowHandle<W> {
        &self.window
    }

    /// Connect and run until cancelled, the peer closes, or a fatal error.
    pub async fn run(&mut self) -> Result<CloseReason, BridgeError> {
        self.state = BridgeState::Connecting;
        info!(endpoint = %self.endpoint, "Connecting extension bridge");

        let connected = tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            result = connect_async(self.endpoint.as_str()) => Some(result),
        };

        match connected {
            None => {
                debug!("Cancelled while connecting");
                self.finish().await;
                Ok(CloseReason::Cancelled)
            }
            Some(Err(e)) => {
                warn!(endpoint = %self.endpoint, error = %e, "Extension bridge connect failed");
                self.finish().await;
                Err(BridgeError::Connect(e.to_string()))
            }
            Some(Ok((ws, _))) => self.run_on(ws).await,
        }
    }

    /// Run the Ready and Running phases over an already open channel, then
    /// close it.
    pub async fn run_on<S>(&mut self, mut ws: S) -> Result<CloseReason, BridgeError>
    where
        S: Stream<Item = Result<Message, WsError>> + Sink<Message, Error = WsError> + Unpin,
    {
        let result = self.serve(&mut ws).await;
        if let Err(e) = &result {
            warn!(error = %e, "Extension bridge stopped");
        }

        self.state = BridgeState::Closing;
        self.window.destroy().await;
        match tokio::time::timeout(self.close_timeout, ws.close()).await {
            Ok(Ok(())) => debug!("Control channel closed"),
            Ok(Err(e)) => debug!(error = %e, "Control channel close failed"),
            Err(_) => debug!("Control channel close timed out"),
        }
        self.state = BridgeState::Closed;
        result
    }

    /// Closing without an open channel.
    async fn finish(&mut self) {
        self.state = BridgeState::Closing;
        self.window.destroy().await;
        self.state = BridgeState::Closed;
    }

    async fn serve<S>(&mut self, ws: &mut S) -> Result<CloseReason, BridgeError>
    where
        S: Stream<Item = Result<Message, WsError>> + Sink<Message, Error = WsError> + Unpin,
    {
        send(ws, &Outbound::Ready).await?;
        self.state = BridgeState::Running;
        info!("Extension bridge ready");

        loop {
            let frame = tokio::select! {
                biased;
                _ = self.token.cancelled() => return Ok(CloseReason::Cancelled),
                frame = ws.next() => frame,
            };

            let step = match frame {
                Some(Ok(Message::Text(text))) => self.handle_text(ws, text.as_str()).await?,
                Some(Ok(Message::Close(frame))) => {
                    debug!(?frame, "Peer closed control channel");
                    Step::Stop(CloseReason::PeerClosed)
                }
                // Pongs for incoming pings are queued by tungstenite itself.
                Some(Ok(_)) => Step::Continue,
                Some(Err(e)) => return Err(BridgeError::Transport(e.to_string())),
                None => Step::Stop(CloseReason::PeerClosed),
            };

            if let Step::Stop(reason) = step {
                return Ok(reason);
            }
        }
    }

    async fn handle_text<S>(&mut self, ws: &mut S, text: &str) -> Result<Step, BridgeError>
    where
        S: Sink<Message, Error = WsError> + Unpin,
    {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| BridgeError::MalformedMessage(e.to_string()))?;
        if !value.is_object() {
            return Err(BridgeError::MalformedMessage(format!("expected a JSON object, got {text}")));
        }

        let inbound = match serde_json::from_value::<Inbound>(value) {
            Ok(inbound) => inbound,
            Err(e) => {
                warn!(error = %e, "Ignoring unrecognised control message");
                return Ok(Step::Continue);
            }
        };

        match inbound {
            Inbound::ExitRequest => {
                info!("Exit requested by content host");
                self.window.destroy().await;
            }
            Inbound::Extension(request) => {
                let call = match request.call() {
                    Ok(call) => call,
                    Err(e) => {
                        warn!(call = %request.extension_call, error = %e, "Bad extension parameters");
                        return Ok(Step::Continue);
                    }
                };
                // A dialog can stay open indefinitely; cancellation still ends it.
                let outcome = tokio::select! {
                    biased;
                    _ = self.token.cancelled() => return Ok(Step::Stop(CloseReason::Cancelled)),
                    outcome = dispatch(&mut self.window, call) => outcome,
                };
                if let Some(result) = outcome {
                    let response = Outbound::Response(ExtensionResponse {
                        call: request.extension_call,
                        id: request.extension_id,
                        result,
                    });
                    send(ws, &response).await?;
                }
            }
            Inbound::Unknown => debug!("Ignoring control message of unknown type"),
        }
        Ok(Step::Continue)
    }
}

async fn send<S>(ws: &mut S, message: &Outbound) -> Result<(), BridgeError>
where
    S: Sink<Message, Error = WsError> + Unpin,
{
    let text = serde_json::to_string(message).map_err(|e| BridgeError::Transport(e.to_string()))?;
    ws.send(Message::Text(text.into()))
        .await
        .map_err(|e| BridgeError::Transport(e.to_string()))
}

#[cfg(test)]
mod tests;
