//! Buffer and event-loop limits configuration.

use serde::Deserialize;

/// Per-connection buffer limits and multiplexer tuning.
///
/// These limits keep a single slow or hostile client from exhausting
/// server memory.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Bytes requested per socket read (default: 512).
    #[serde(default = "default_read_chunk")]
    pub read_chunk: usize,
    /// Maximum buffered input without a complete line (default: 8192).
    #[serde(default = "default_max_input_buffer")]
    pub max_input_buffer: usize,
    /// Maximum unsent output per client before it is dropped (default: 1 MiB).
    #[serde(default = "default_max_output_buffer")]
    pub max_output_buffer: usize,
    /// Readiness events drained per poll (default: 64).
    #[serde(default = "default_max_events")]
    pub max_events: usize,
    /// Upper bound on one readiness wait, in milliseconds (default: 1000).
    /// The idle sweep runs at least this often.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            read_chunk: default_read_chunk(),
            max_input_buffer: default_max_input_buffer(),
            max_output_buffer: default_max_output_buffer(),
            max_events: default_max_events(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_read_chunk() -> usize {
    512
}

fn default_max_input_buffer() -> usize {
    8192
}

fn default_max_output_buffer() -> usize {
    1024 * 1024
}

fn default_max_events() -> usize {
    64
}

fn default_poll_interval_ms() -> u64 {
    1000
}
