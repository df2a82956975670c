//! winrelay-relay: remote launch of native window processes.
//!
//! A daemon on the display host accepts length-prefixed command frames over
//! TCP, runs the window process with those arguments and answers with its
//! exit status. The client rewrites the window URL so the spawned window
//! reaches back to the content host rather than its own loopback interface.

pub mod client;
pub mod codec;
pub mod rewrite;
pub mod server;
pub mod status;

pub use client::{request, request_with_timeout, LaunchRequest, RelayClient};
pub use codec::{decode_command, decode_status, encode_command, encode_status};
pub use rewrite::rewrite_loopback;
pub use server::{serve, RelayServer};
pub use status::LaunchStatus;

/// Crates whose log output the relay binaries show.
pub const LOG_CRATES: [&str; 3] = ["winrelay_relay", "winrelay_common", "winrelay_config"];
