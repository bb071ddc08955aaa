//! NICK command handler for connection registration and renames.

use super::welcome::complete_registration;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};
use ircserv_proto::{Command, MessageRef, NickExt};
use tracing::info;

/// Handler for NICK command.
pub struct NickHandler;

impl Handler for NickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // NICK <nickname>
        let nick = msg.arg(0).ok_or(HandlerError::NoNicknameGiven)?;

        let Some(session) = ctx.session() else {
            return Ok(());
        };
        if session.nick.as_deref() == Some(nick) {
            return Ok(());
        }
        let registered = session.is_registered();

        if ctx.matrix.find_nick(nick).is_some() {
            return Err(HandlerError::NicknameInUse(nick.to_string()));
        }
        if !nick.is_valid_nick() {
            return Err(HandlerError::ErroneousNickname(nick.to_string()));
        }

        if !registered {
            ctx.matrix.set_nick(ctx.conn, nick);
            if let Some(session) = ctx.session_mut() {
                session.registration.nick = true;
            }
            complete_registration(ctx);
            return Ok(());
        }

        // Rename: tell the client and everyone sharing a channel, once each,
        // under the old prefix.
        let old_nick = ctx.nick();
        let notice = ctx.from_user(Command::NICK(nick.to_string()));
        ctx.matrix.set_nick(ctx.conn, nick);
        ctx.send(notice.clone());
        for peer in ctx.matrix.peers_of(ctx.conn) {
            ctx.matrix.send_to(peer, &notice);
        }
        info!(conn = %ctx.conn, old = %old_nick, new = %nick, "Nick changed");
        Ok(())
    }
}
