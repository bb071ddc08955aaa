//! Core handler infrastructure.
//!
//! This module contains the fundamental types for the command handler
//! system: the per-command [`Context`], the [`Handler`] trait and the
//! [`Registry`] that routes verbs to handlers.
//!
//! ### Registration gate
//!
//! The registry keeps two tables:
//!
//! - `universal`: commands valid in any state (PASS, NICK, USER, CAP, QUIT, PING, PONG)
//! - `post_reg`: commands requiring registration (JOIN, PRIVMSG, MODE, ...)
//!
//! A post-registration command from an unregistered client is answered with
//! 451 before any handler sees it.

pub mod context;
pub mod registry;
pub mod traits;

pub use context::Context;
pub use registry::Registry;
pub use traits::Handler;
