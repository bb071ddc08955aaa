//! PART command handler.

use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::{join_args, split_targets, Context, Handler};
use ircserv_proto::{Command, MessageRef};

const DEFAULT_PART_REASON: &str = "Leaving";

/// Handler for PART command.
pub struct PartHandler;

impl Handler for PartHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // PART <channel>{,<channel>} [:<reason>]
        let channels = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let reason = join_args(msg.args(), 1).unwrap_or_else(|| DEFAULT_PART_REASON.to_string());

        for name in split_targets(channels) {
            if let Err(e) = part_channel(ctx, name, &reason) {
                ctx.send_error(e, "PART");
            }
        }
        Ok(())
    }
}

fn part_channel(ctx: &mut Context<'_>, name: &str, reason: &str) -> HandlerResult {
    let Some(channel) = ctx.matrix.channel(name) else {
        return Err(HandlerError::NoSuchChannel(name.to_string()));
    };
    if !channel.is_member(ctx.conn) {
        return Err(HandlerError::Channel(name.to_string(), ChannelError::NotOnChannel));
    }

    let part = ctx.from_user(Command::PART(name.to_string(), reason.to_string()));
    ctx.matrix.broadcast(name, &part, None);
    ctx.matrix.part_channel(ctx.conn, name);
    Ok(())
}
