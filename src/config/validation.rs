//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Lowest port a client listener may use.
pub const MIN_PORT: u16 = 1025;
/// Highest port a client listener may use.
pub const MAX_PORT: u16 = 65534;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("a connection password is required")]
    MissingPassword,
    #[error("port {0} is outside {MIN_PORT}-{MAX_PORT}")]
    PortOutOfRange(u16),
    #[error("server.idle_timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
    #[error("limits.{0} must be greater than zero")]
    ZeroLimit(&'static str),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.is_empty() || config.server.name.contains(' ') {
        errors.push(ValidationError::MissingServerName);
    }
    if config.server.password.as_deref().is_none_or(str::is_empty) {
        errors.push(ValidationError::MissingPassword);
    }

    let port = config.listen.address.port();
    if !(MIN_PORT..=MAX_PORT).contains(&port) {
        errors.push(ValidationError::PortOutOfRange(port));
    }

    let timeouts = &config.server.idle_timeouts;
    for (name, value) in [
        ("registration", timeouts.registration),
        ("ping", timeouts.ping),
        ("timeout", timeouts.timeout),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    let limits = &config.limits;
    for (name, value) in [
        ("read_chunk", limits.read_chunk),
        ("max_input_buffer", limits.max_input_buffer),
        ("max_output_buffer", limits.max_output_buffer),
        ("max_events", limits.max_events),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroLimit(name));
        }
    }
    // A zero wait turns the readiness loop into a busy spin.
    if limits.poll_interval_ms == 0 {
        errors.push(ValidationError::ZeroLimit("poll_interval_ms"));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config::default().with_overrides(6667, "pw".into())
    }

    #[test]
    fn test_defaults_with_password_pass() {
        assert_eq!(validate(&valid()), Ok(()));
    }

    #[test]
    fn test_port_bounds() {
        for port in [1025, 65534] {
            let config = Config::default().with_overrides(port, "pw".into());
            assert!(validate(&config).is_ok(), "port {port}");
        }
        for port in [0, 80, 1024, 65535] {
            let config = Config::default().with_overrides(port, "pw".into());
            assert_eq!(
                validate(&config),
                Err(vec![ValidationError::PortOutOfRange(port)])
            );
        }
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let mut config = valid();
        config.limits.poll_interval_ms = 0;
        assert_eq!(
            validate(&config),
            Err(vec![ValidationError::ZeroLimit("poll_interval_ms")])
        );
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = Config::default().with_overrides(80, String::new());
        config.server.idle_timeouts.ping = 0;
        config.limits.read_chunk = 0;

        let errors = validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingPassword,
                ValidationError::PortOutOfRange(80),
                ValidationError::ZeroTimeout("ping"),
                ValidationError::ZeroLimit("read_chunk"),
            ]
        );
    }
}
