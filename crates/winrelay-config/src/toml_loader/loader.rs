//! Reading `config.toml` for the relay daemon, launch client and window host.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info, warn};
use winrelay_common::ConfigError;

use super::paths::{create_default_config, default_config_path};
use crate::schema::WinrelayConfig;
use crate::validation;

/// Read and parse the config at `path`.
///
/// Sections and keys left out keep their defaults. Out-of-range values are
/// reported as a warning and kept as parsed.
pub fn load_from_path(path: &Path) -> Result<WinrelayConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "cannot read winrelay config {}: {e}",
                path.display()
            )));
        }
    };

    let config: WinrelayConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), error = %e, "Config has out-of-range values");
    }

    info!(path = %path.display(), relay_port = config.relay.port, "Config loaded");
    Ok(config)
}

/// Read the per-user config, writing the documented template on first run.
pub fn load_default() -> Result<WinrelayConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            debug!(path = %path.display(), "No winrelay config yet");
            create_default_config(&path)?;
            Ok(WinrelayConfig::default())
        }
        other => other,
    }
}
