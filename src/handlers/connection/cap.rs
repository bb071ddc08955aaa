//! CAP handler.
//!
//! No capabilities are offered. Answering LS with an empty list lets
//! IRCv3-aware clients finish negotiation instead of waiting for one.

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};
use ircserv_proto::{Command, Message, MessageRef, Prefix};

/// Handler for CAP command.
pub struct CapHandler;

impl Handler for CapHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // CAP <subcommand> [args]
        let Some(sub) = msg.arg(0) else {
            return Ok(());
        };

        let reply = match sub.to_ascii_uppercase().as_str() {
            "LS" => Command::CAP(ctx.nick(), "LS".into(), String::new()),
            // Nothing can be enabled, so every request is refused.
            "REQ" => Command::CAP(ctx.nick(), "NAK".into(), msg.arg(1).unwrap_or_default().to_string()),
            _ => return Ok(()),
        };

        let server = ctx.server_name().to_string();
        ctx.send(Message::from(reply).with_prefix(Prefix::ServerName(server)));
        Ok(())
    }
}
