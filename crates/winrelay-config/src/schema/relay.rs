use serde::{Deserialize, Serialize};

/// Default TCP port shared by the relay daemon and the launch client.
pub const DEFAULT_RELAY_PORT: u16 = 43101;

/// Configuration for the launch relay daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Interface the daemon binds to.
    pub bind_address: String,
    /// TCP port the daemon listens on.
    pub port: u16,
    /// Program (and leading arguments) prepended to every received command.
    pub spawn_prefix: Vec<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".into(),
            port: DEFAULT_RELAY_PORT,
            spawn_prefix: vec!["winrelay-window".into()],
        }
    }
}

/// Configuration for the launch client that talks to a relay daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Host running the relay daemon.
    pub host: String,
    pub port: u16,
    /// Address the display host uses to reach this machine. Replaces
    /// `localhost` in the window URL; empty leaves the URL untouched.
    pub display_address: String,
    /// Seconds to wait for the TCP connect (valid range: 1-120).
    pub connect_timeout_secs: u64,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: DEFAULT_RELAY_PORT,
            display_address: String::new(),
            connect_timeout_secs: 5,
        }
    }
}
