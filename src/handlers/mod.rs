//! IRC command handlers.
//!
//! This module contains the Handler trait and command registry for dispatching
//! incoming IRC messages to appropriate handlers.
//!
//! ## Zero-Copy Architecture
//!
//! Handlers receive `MessageRef<'_>` which borrows directly from the line the
//! multiplexer just framed. Use `msg.arg(n)` to access arguments as `&str`
//! slices.

mod channel;
mod connection;
mod core;
mod helpers;
mod messaging;
mod mode;


pub use self::core::{Context, Handler, Registry};
pub use helpers::{join_args, server_reply, split_targets};
