//! PING and PONG handlers.

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};
use ircserv_proto::{Command, Message, MessageRef, Prefix};

/// Handler for PING command.
pub struct PingHandler;

impl Handler for PingHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // PING <token>
        let token = msg.arg(0).ok_or(HandlerError::NoOrigin)?;

        let server = ctx.server_name().to_string();
        let pong = Message::from(Command::PONG(server.clone(), token.to_string()))
            .with_prefix(Prefix::ServerName(server));
        ctx.send(pong);
        Ok(())
    }
}

/// Handler for PONG command.
pub struct PongHandler;

impl Handler for PongHandler {
    fn handle(&self, ctx: &mut Context<'_>, _msg: &MessageRef<'_>) -> HandlerResult {
        let now = ctx.now;
        if let Some(session) = ctx.session_mut() {
            session.touch(now);
        }
        Ok(())
    }
}
