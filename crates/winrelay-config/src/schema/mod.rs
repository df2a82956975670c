//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod relay;
mod system;
mod window;

pub use relay::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Root configuration shared by the relay daemon, the launch client and the
/// native window host. Each binary reads only the sections it needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct WinrelayConfig {
    pub relay: RelayConfig,
    pub launch: LaunchConfig,
    pub window: WindowConfig,
    pub bridge: BridgeConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = WinrelayConfig::default();
        assert_eq!(config.relay.port, DEFAULT_RELAY_PORT);
        assert_eq!(config.relay.bind_address, "0.0.0.0");
        assert_eq!(config.relay.spawn_prefix, vec!["winrelay-window".to_string()]);
        assert_eq!(config.launch.port, config.relay.port);
        assert!(config.launch.display_address.is_empty());
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 768);
        assert!(config.window.flags.is_empty());
        assert_eq!(config.bridge.path, "bridge");
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: WinrelayConfig = toml::from_str(
            r#"
[window]
flags = 34

[logging]
level = "debug"
"#,
        )
        .unwrap();
        assert_eq!(config.window.flags.bits(), 34);
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.relay.port, DEFAULT_RELAY_PORT);
    }

    #[test]
    fn logging_directive_scopes_each_crate() {
        let logging = LoggingConfig {
            level: LogLevel::Warn,
        };
        assert_eq!(
            logging.directive(&["winrelay_relay", "winrelay"]),
            "winrelay_relay=warn,winrelay=warn"
        );
    }
}
