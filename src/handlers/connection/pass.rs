//! PASS command handler.

use super::welcome::complete_registration;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{Context, Handler};
use ircserv_proto::MessageRef;
use tracing::debug;

/// Handler for PASS command.
///
/// The password is accepted once; a wrong guess leaves the client free to
/// try again.
pub struct PassHandler;

impl Handler for PassHandler {
    fn handle(&self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        // PASS <password>
        let password = msg.arg(0).ok_or(HandlerError::NeedMoreParams)?;

        let accepted = ctx
            .session()
            .is_some_and(|s| s.registration.password || s.is_registered());
        if accepted {
            return Err(HandlerError::AlreadyRegistered);
        }

        if password != ctx.matrix.server_info.password {
            debug!(conn = %ctx.conn, "Password mismatch");
            return Err(HandlerError::PasswordMismatch);
        }

        if let Some(session) = ctx.session_mut() {
            session.registration.password = true;
        }
        complete_registration(ctx);
        Ok(())
    }
}
