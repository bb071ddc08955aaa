//! State management module.
//!
//! Contains the Matrix (server state) and the entities it owns.

mod channel;
mod matrix;
mod session;
mod uid;

pub use channel::Channel;
pub use matrix::{Matrix, ServerInfo};
pub use session::Session;
pub use uid::{ConnId, ConnIdGenerator};
