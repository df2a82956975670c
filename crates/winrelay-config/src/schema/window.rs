use serde::{Deserialize, Serialize};
use winrelay_common::LaunchFlags;

/// Defaults for the native window when the command line leaves them out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial width in logical pixels (valid range: 100-16384).
    pub width: u32,
    /// Initial height in logical pixels (valid range: 100-16384).
    pub height: u32,
    pub title: String,
    pub flags: LaunchFlags,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: String::new(),
            flags: LaunchFlags::empty(),
        }
    }
}

/// Extension bridge channel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Path of the control channel on the content host.
    pub path: String,
    /// Seconds to wait for the close handshake (valid range: 0-30).
    pub close_timeout_secs: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            path: "bridge".into(),
            close_timeout_secs: 2,
        }
    }
}
