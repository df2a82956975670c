//! winrelay configuration system.
//!
//! TOML-based configuration shared by the relay daemon, the launch client
//! and the native window host. All sections use sensible defaults so
//! partial configs work out of the box.

pub mod logging;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use logging::init_logging;
pub use schema::{
    BridgeConfig, LaunchConfig, LogLevel, LoggingConfig, RelayConfig, WindowConfig,
    WinrelayConfig, DEFAULT_RELAY_PORT,
};

use std::path::Path;

use winrelay_common::ConfigError;

/// Load config from `path` if given, otherwise from the platform default
/// location (creating it on first run).
pub fn load_config(path: Option<&Path>) -> Result<WinrelayConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}
