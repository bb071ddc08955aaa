//! User MODE handling.
//!
//! No user modes exist; a client may only query its own (empty) set.

use crate::error::{HandlerError, HandlerResult};
use crate::handlers::Context;
use ircserv_proto::{MessageRef, Response};

pub(super) fn handle_user_mode(ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
    let target = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;

    if target == ctx.nick() {
        ctx.reply(Response::RPL_UMODEIS, vec!["+".to_string()]);
        return Ok(());
    }
    if ctx.matrix.find_nick(target).is_none() {
        return Err(HandlerError::NoSuchNick(target.to_string()));
    }
    Err(HandlerError::UsersDontMatch)
}
