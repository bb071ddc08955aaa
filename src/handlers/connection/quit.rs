//! QUIT handler.

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};
use ircserv_proto::MessageRef;

/// Handler for QUIT command.
pub struct QuitHandler;

impl Handler for QuitHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let quit_msg = msg.arg(0).map(|s| s.to_string());

        tracing::info!(
            conn = %ctx.conn,
            nick = %ctx.nick(),
            message = ?quit_msg,
            "Client quit"
        );

        // Signal quit by returning Quit error that the event loop will handle
        Err(HandlerError::Quit(quit_msg))
    }
}
