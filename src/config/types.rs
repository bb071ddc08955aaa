//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::limits::LimitsConfig;
use super::listen::ListenConfig;
use super::validation::{self, ValidationError};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server information.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Buffer and event-loop limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply the command-line port and password, which take precedence
    /// over the file.
    pub fn with_overrides(mut self, port: u16, password: String) -> Self {
        self.listen.address.set_port(port);
        self.server.password = Some(password);
        self
    }

    /// Run the startup checks, collecting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate(self).map_err(ConfigError::Invalid)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name used as the prefix of every server reply.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Version string advertised in 002 and 004.
    #[serde(default = "default_version")]
    pub version: String,
    /// Connection password every client must send with PASS.
    #[serde(default)]
    pub password: Option<String>,
    /// Keepalive and registration deadlines.
    #[serde(default)]
    pub idle_timeouts: IdleTimeoutsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            version: default_version(),
            password: None,
            idle_timeouts: IdleTimeoutsConfig::default(),
        }
    }
}

fn default_server_name() -> String {
    "ircserv".to_string()
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Idle timeout configuration for client connection keepalive.
///
/// - `registration`: Seconds allowed to finish PASS/NICK/USER (default: 30)
/// - `ping`: Seconds of silence before a registered client is sent PING (default: 60)
/// - `timeout`: Seconds to wait for any reply after that PING (default: 60)
#[derive(Debug, Clone, Deserialize)]
pub struct IdleTimeoutsConfig {
    /// Seconds of idle before sending PING to client (default: 60).
    #[serde(default = "default_ping_interval")]
    pub ping: u64,

    /// Seconds to wait for PONG after sending PING before disconnect (default: 60).
    /// Total idle time before disconnect = ping + timeout.
    #[serde(default = "default_ping_timeout")]
    pub timeout: u64,

    /// Seconds allowed for the registration handshake before disconnect (default: 30).
    #[serde(default = "default_registration_timeout")]
    pub registration: u64,
}

impl Default for IdleTimeoutsConfig {
    fn default() -> Self {
        Self {
            ping: default_ping_interval(),
            timeout: default_ping_timeout(),
            registration: default_registration_timeout(),
        }
    }
}

fn default_ping_interval() -> u64 {
    60
}

fn default_ping_timeout() -> u64 {
    60
}

fn default_registration_timeout() -> u64 {
    30
}
