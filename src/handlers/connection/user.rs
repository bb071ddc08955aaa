//! USER command handler.

use super::welcome::complete_registration;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};
use ircserv_proto::MessageRef;

/// Handler for USER command.
pub struct UserHandler;

impl Handler for UserHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // USER <username> <mode> <unused> :<realname>
        if msg.args().len() < 4 {
            return Err(HandlerError::NeedMoreParams);
        }

        let Some(session) = ctx.session_mut() else {
            return Ok(());
        };
        if session.registration.user {
            return Err(HandlerError::AlreadyRegistered);
        }

        session.user = msg.arg(0).map(str::to_string);
        session.realname = msg.arg(3).map(str::to_string);
        session.registration.user = true;

        complete_registration(ctx);
        Ok(())
    }
}
