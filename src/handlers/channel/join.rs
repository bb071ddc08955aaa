//! JOIN command handler.

use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::{split_targets, Context, Handler};
use ircserv_proto::{ChannelExt, Command, MessageRef, Response};
use tracing::debug;

/// Handler for JOIN command.
///
/// Each channel in the list is joined independently; a failure only skips
/// that channel.
pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // JOIN <channel>{,<channel>} [<key>{,<key>}]
        let channels = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;
        let keys: Vec<&str> = msg.arg(1).map(|k| split_targets(k).collect()).unwrap_or_default();

        for (i, name) in split_targets(channels).enumerate() {
            if let Err(e) = join_channel(ctx, name, keys.get(i).copied()) {
                ctx.send_error(e, "JOIN");
            }
        }
        Ok(())
    }
}

fn join_channel(ctx: &mut Context<'_>, name: &str, key: Option<&str>) -> HandlerResult {
    if !name.is_channel_name() {
        return Err(HandlerError::NoSuchChannel(name.to_string()));
    }

    let nick = ctx.nick();
    let existing = ctx.matrix.channel(name);
    let created = existing.is_none();
    if let Some(channel) = existing {
        if channel.is_member(ctx.conn) {
            return Ok(());
        }
        let error = if channel.invite_only && !channel.is_invited(&nick) {
            Some(ChannelError::InviteOnlyChan)
        } else if channel.key.is_some() && channel.key.as_deref() != key {
            Some(ChannelError::BadChannelKey)
        } else if channel.is_full() {
            Some(ChannelError::ChannelIsFull)
        } else {
            None
        };
        if let Some(e) = error {
            return Err(HandlerError::Channel(name.to_string(), e));
        }
    }

    let channel = ctx.matrix.channel_or_create(name);
    // The creator's key, if any, locks the new channel.
    if created {
        channel.key = key.filter(|k| !k.is_empty()).map(str::to_string);
    }
    channel.add_member(ctx.conn, &nick);
    debug!(conn = %ctx.conn, channel = %name, created, "Joined channel");

    let join = ctx.from_user(Command::JOIN(name.to_string()));
    ctx.matrix.broadcast(name, &join, None);
    send_topic(ctx, name);
    send_names(ctx, name);
    Ok(())
}

/// Send 332 with the topic, or 331 when none is set.
pub(super) fn send_topic(ctx: &mut Context<'_>, name: &str) {
    let topic = ctx.matrix.channel(name).and_then(|c| c.topic.clone());
    match topic {
        Some(topic) => ctx.reply(Response::RPL_TOPIC, vec![name.to_string(), topic]),
        None => ctx.reply(
            Response::RPL_NOTOPIC,
            vec![name.to_string(), "No topic is set".to_string()],
        ),
    }
}

/// Send 353 followed by 366.
fn send_names(ctx: &mut Context<'_>, name: &str) {
    let names = match ctx.matrix.channel(name) {
        Some(channel) => ctx.matrix.names(channel).join(" "),
        None => return,
    };
    ctx.reply(
        Response::RPL_NAMREPLY,
        vec!["=".to_string(), name.to_string(), names],
    );
    ctx.reply(
        Response::RPL_ENDOFNAMES,
        vec![name.to_string(), "End of NAMES list".to_string()],
    );
}
