//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig, IdleTimeoutsConfig)
//! - [`listen`]: Listener address configuration
//! - [`limits`]: Buffer and event-loop limits
//! - [`validation`]: Startup checks

mod limits;
mod listen;
mod types;
pub mod validation;

pub use types::{Config, IdleTimeoutsConfig};
