//! The handler trait.

use super::context::Context;
use crate::error::HandlerResult;
use ircserv_proto::MessageRef;

/// A command handler.
///
/// Handlers run to completion on the event-loop thread. They read the
/// command through `msg`, mutate state through `ctx.matrix`, and queue
/// replies; they never touch sockets.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult;
}
