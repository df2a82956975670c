//! Tracing setup shared by the winrelay binaries.

use tracing_subscriber::EnvFilter;

use crate::schema::LoggingConfig;

/// Filter directive for `crates`: a command-line `level` applies to each of
/// them, otherwise the configured level does.
pub fn filter_directive(crates: &[&str], level: Option<&str>, config: &LoggingConfig) -> String {
    match level {
        Some(level) => crates
            .iter()
            .map(|krate| format!("{krate}={level}"))
            .collect::<Vec<_>>()
            .join(","),
        None => config.directive(crates),
    }
}

/// Install the global fmt subscriber writing to stderr. `RUST_LOG` wins over
/// both the command line and the config.
pub fn init_logging(crates: &[&str], level: Option<&str>, config: &LoggingConfig) {
    let directive = filter_directive(crates, level, config);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LogLevel;

    const CRATES: [&str; 2] = ["winrelay_relay", "winrelay_common"];

    #[test]
    fn command_line_level_applies_to_every_crate() {
        let directive = filter_directive(&CRATES, Some("trace"), &LoggingConfig::default());
        assert_eq!(directive, "winrelay_relay=trace,winrelay_common=trace");
    }

    #[test]
    fn config_level_is_the_fallback() {
        let config = LoggingConfig {
            level: LogLevel::Error,
        };
        assert_eq!(
            filter_directive(&CRATES, None, &config),
            "winrelay_relay=error,winrelay_common=error"
        );
    }

    #[test]
    fn directive_is_accepted_by_env_filter() {
        let directive = filter_directive(&CRATES, None, &LoggingConfig::default());
        assert!(EnvFilter::try_new(directive).is_ok());
    }
}
