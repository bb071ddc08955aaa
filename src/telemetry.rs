//! Telemetry utilities for command timing and log correlation.

use std::time::{Duration, Instant};

/// Commands slower than this are logged at `debug`.
const SLOW_COMMAND: Duration = Duration::from_millis(5);

/// Guard for timing command execution.
///
/// Logs the elapsed time when dropped if the command ran slow.
pub struct CommandTimer {
    command: String,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        if elapsed > SLOW_COMMAND {
            tracing::debug!(
                command = %self.command,
                elapsed_us = elapsed.as_micros() as u64,
                "Slow command"
            );
        }
    }
}

/// Standardized span constructors for IRC observability.
pub mod spans {
    use crate::state::ConnId;
    use tracing::{Span, info_span};

    /// Create a span for a client connection.
    pub fn connection(conn: ConnId, ip: &str) -> Span {
        info_span!("connection", conn = %conn, ip = %ip)
    }

    /// Create a span for a command execution.
    pub fn command(name: &str, source: &str) -> Span {
        info_span!("command", name = %name, source = %source)
    }
}
