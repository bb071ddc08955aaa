//! MODE command handlers.
//!
//! MODE is polymorphic: a first parameter with a channel prefix selects the
//! channel form, anything else (including no parameter) the user form.

mod channel;
mod user;

use crate::error::HandlerResult;
use crate::handlers::{Context, Handler};
use ircserv_proto::{ChannelExt, MessageRef};

/// Handler for MODE command.
pub struct ModeHandler;

impl Handler for ModeHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        match msg.arg(0) {
            Some(target) if target.has_channel_prefix() => channel::handle_channel_mode(ctx, msg),
            _ => user::handle_user_mode(ctx, msg),
        }
    }
}
