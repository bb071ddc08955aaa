//! KICK command handler.

use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};
use ircserv_proto::{Command, MessageRef};
use tracing::info;

const DEFAULT_KICK_REASON: &str = "No reason";

/// Handler for KICK command.
pub struct KickHandler;

impl Handler for KickHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // KICK <channel> <nick> [:<reason>]
        let (Some(name), Some(target_nick)) = (msg.arg(0), msg.arg(1)) else {
            return Err(HandlerError::NeedMoreParams);
        };
        let reason = msg.arg(2).unwrap_or(DEFAULT_KICK_REASON);
        let channel_err = |e| HandlerError::Channel(name.to_string(), e);

        let Some(channel) = ctx.matrix.channel(name) else {
            return Err(HandlerError::NoSuchChannel(name.to_string()));
        };
        if !channel.is_operator(ctx.conn) {
            return Err(channel_err(ChannelError::ChanOpPrivsNeeded));
        }
        let target = match ctx.matrix.find_nick(target_nick) {
            Some(id) if channel.is_member(id) => id,
            _ => return Err(channel_err(ChannelError::UserNotInChannel(target_nick.to_string()))),
        };
        if target == ctx.conn {
            return Err(channel_err(ChannelError::CannotKickSelf));
        }

        let kick = ctx.from_user(Command::KICK(
            name.to_string(),
            target_nick.to_string(),
            reason.to_string(),
        ));
        ctx.matrix.broadcast(name, &kick, None);
        ctx.matrix.part_channel(target, name);

        info!(conn = %ctx.conn, channel = %name, target = %target_nick, "User kicked");
        Ok(())
    }
}
