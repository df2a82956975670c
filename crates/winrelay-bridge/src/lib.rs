//! Extension bridge for native window processes.
//!
//! The bridge runs inside a spawned window process. It opens a WebSocket
//! control channel back to the content host, announces readiness, and then
//! executes native-only requests (file pickers, resize, title) against the
//! window it owns:
//! - Closed message types for the control channel (`protocol`)
//! - A `NativeWindow` seam the window toolkit plugs into (`window`)
//! - Call dispatch (`dispatch`)
//! - The receive loop state machine with explicit cancellation (`bridge`)

pub mod bridge;
pub mod dispatch;
pub mod endpoint;
pub mod filters;
pub mod protocol;
pub mod window;

pub use bridge::{Bridge, BridgeHandle, BridgeState, CloseReason, DEFAULT_CLOSE_TIMEOUT};
pub use endpoint::bridge_endpoint;
pub use filters::FileFilter;
pub use dispatch::dispatch;
pub use protocol::{Call, ExtensionRequest, ExtensionResponse, Inbound, Outbound, ResponseValue};
pub use window::{DialogKind, DialogRequest, NativeWindow, WindowHandle, WindowSize};
