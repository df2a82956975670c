//! Where the per-user config lives, and first-run creation.

use std::path::{Path, PathBuf};

use tracing::info;
use winrelay_common::ConfigError;

use super::template::default_config_toml;

/// `<config dir>/winrelay/config.toml`, e.g. `~/.config/winrelay/config.toml`
/// on Linux. Binaries take `--config` to point elsewhere.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("winrelay").join("config.toml"))
        .ok_or_else(|| {
            ConfigError::ParseError("no per-user config directory; pass --config <path>".into())
        })
}

/// Write the commented template to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_err = |e: std::io::Error| {
        ConfigError::ParseError(format!("cannot create winrelay config {}: {e}", path.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, default_config_toml()).map_err(write_err)?;

    info!(path = %path.display(), "Wrote default winrelay config");
    Ok(())
}
