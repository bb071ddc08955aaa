//! INVITE command handler.

use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};
use ircserv_proto::{Command, MessageRef, Response};

/// Handler for INVITE command.
///
/// An invite lets its holder past `+i` once; joining consumes it.
pub struct InviteHandler;

impl Handler for InviteHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // INVITE <nick> <channel>
        let (Some(target_nick), Some(name)) = (msg.arg(0), msg.arg(1)) else {
            return Err(HandlerError::NeedMoreParams);
        };

        let target = ctx
            .matrix
            .find_nick(target_nick)
            .ok_or_else(|| HandlerError::NoSuchNick(target_nick.to_string()))?;
        let Some(channel) = ctx.matrix.channel(name) else {
            return Err(HandlerError::NoSuchChannel(name.to_string()));
        };
        if !channel.is_operator(ctx.conn) {
            return Err(HandlerError::Channel(name.to_string(), ChannelError::ChanOpPrivsNeeded));
        }
        if channel.is_member(target) {
            return Err(HandlerError::Channel(
                name.to_string(),
                ChannelError::UserOnChannel(target_nick.to_string()),
            ));
        }

        if let Some(channel) = ctx.matrix.channel_mut(name) {
            channel.invite(target_nick);
        }
        let invite = ctx.from_user(Command::INVITE(target_nick.to_string(), name.to_string()));
        ctx.matrix.send_to(target, &invite);
        ctx.reply(
            Response::RPL_INVITING,
            vec![target_nick.to_string(), name.to_string()],
        );
        Ok(())
    }
}
