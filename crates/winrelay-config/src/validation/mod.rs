//! Full configuration validation.
//!
//! Validates numeric ranges and required strings, collecting all errors
//! into a single `ConfigError`.

mod helpers;


use crate::schema::WinrelayConfig;
use helpers::{validate_not_blank, validate_range};
use winrelay_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WinrelayConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_relay(&mut errors, config);
    validate_launch(&mut errors, config);
    validate_window(&mut errors, config);
    validate_bridge(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_relay(errors: &mut Vec<String>, config: &WinrelayConfig) {
    validate_not_blank(errors, "relay.bind_address", &config.relay.bind_address);
    validate_range(errors, "relay.port", config.relay.port.into(), 1, 65535);
    if config.relay.spawn_prefix.is_empty() {
        errors.push("relay.spawn_prefix must name a program".into());
    }
}

fn validate_launch(errors: &mut Vec<String>, config: &WinrelayConfig) {
    validate_not_blank(errors, "launch.host", &config.launch.host);
    validate_range(errors, "launch.port", config.launch.port.into(), 1, 65535);
    validate_range(
        errors,
        "launch.connect_timeout_secs",
        config.launch.connect_timeout_secs,
        1,
        120,
    );
}

fn validate_window(errors: &mut Vec<String>, config: &WinrelayConfig) {
    validate_range(errors, "window.width", config.window.width.into(), 100, 16384);
    validate_range(errors, "window.height", config.window.height.into(), 100, 16384);
}

fn validate_bridge(errors: &mut Vec<String>, config: &WinrelayConfig) {
    validate_not_blank(errors, "bridge.path", &config.bridge.path);
    validate_range(
        errors,
        "bridge.close_timeout_secs",
        config.bridge.close_timeout_secs,
        0,
        30,
    );
}
