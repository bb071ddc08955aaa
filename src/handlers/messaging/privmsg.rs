//! PRIVMSG command handler.

use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::{split_targets, Context, Handler};
use ircserv_proto::{ChannelExt, Command, MessageRef};

/// Handler for PRIVMSG command.
///
/// Channel traffic goes to every member except the sender; a nickname
/// target receives the message alone.
pub struct PrivmsgHandler;

impl Handler for PrivmsgHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // PRIVMSG <target>{,<target>} :<text>
        let (Some(targets), Some(text)) = (msg.arg(0), msg.arg(1)) else {
            return Err(HandlerError::NeedMoreParams);
        };

        for target in split_targets(targets) {
            if let Err(e) = deliver(ctx, target, text) {
                ctx.send_error(e, "PRIVMSG");
            }
        }
        Ok(())
    }
}

fn deliver(ctx: &mut Context<'_>, target: &str, text: &str) -> HandlerResult {
    let out = ctx.from_user(Command::PRIVMSG(target.to_string(), text.to_string()));

    if target.has_channel_prefix() {
        let Some(channel) = ctx.matrix.channel(target) else {
            return Err(HandlerError::NoSuchChannel(target.to_string()));
        };
        if !channel.is_member(ctx.conn) {
            return Err(HandlerError::Channel(
                target.to_string(),
                ChannelError::CannotSendToChan,
            ));
        }
        ctx.matrix.broadcast(target, &out, Some(ctx.conn));
    } else {
        let recipient = ctx
            .matrix
            .find_nick(target)
            .ok_or_else(|| HandlerError::NoSuchNick(target.to_string()))?;
        ctx.matrix.send_to(recipient, &out);
    }
    Ok(())
}
