//! TOPIC command handler.

use super::join::send_topic;
use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};
use ircserv_proto::{Command, MessageRef};

/// Handler for TOPIC command.
pub struct TopicHandler;

impl Handler for TopicHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // TOPIC <channel> [:<topic>]
        let name = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;

        let Some(channel) = ctx.matrix.channel(name) else {
            return Err(HandlerError::NoSuchChannel(name.to_string()));
        };
        if !channel.is_member(ctx.conn) {
            return Err(HandlerError::Channel(name.to_string(), ChannelError::NotOnChannel));
        }

        let Some(text) = msg.arg(1) else {
            send_topic(ctx, name);
            return Ok(());
        };

        if channel.topic_restricted && !channel.is_operator(ctx.conn) {
            return Err(HandlerError::Channel(name.to_string(), ChannelError::ChanOpPrivsNeeded));
        }

        if let Some(channel) = ctx.matrix.channel_mut(name) {
            channel.topic = Some(text.to_string());
        }
        let topic = ctx.from_user(Command::TOPIC(name.to_string(), text.to_string()));
        ctx.matrix.broadcast(name, &topic, None);
        Ok(())
    }
}
