//! Registration completion and the welcome burst (001-004).

use crate::handlers::Context;
use ircserv_proto::Response;
use tracing::info;

/// Promote the requester if PASS, NICK and USER are all in, sending the
/// welcome burst on the transition.
pub fn complete_registration(ctx: &mut Context<'_>) {
    let now = ctx.now;
    let Some(session) = ctx.session_mut() else {
        return;
    };
    if !session.registration.try_complete() {
        return;
    }
    // The keepalive clock starts at registration, not at connect.
    session.touch(now);
    info!(
        conn = %session.id,
        nick = %session.nick_or_star(),
        realname = session.realname.as_deref().unwrap_or_default(),
        host = %session.host,
        "Client registered"
    );

    let prefix = ctx.prefix();
    let info = ctx.matrix.server_info.clone();
    ctx.reply(
        Response::RPL_WELCOME,
        vec![format!("Welcome to the IRC network {prefix}")],
    );
    ctx.reply(
        Response::RPL_YOURHOST,
        vec![format!("Your host is {}, running version {}", info.name, info.version)],
    );
    ctx.reply(
        Response::RPL_CREATED,
        vec![format!(
            "This server was created {}",
            info.created.format("%a %b %d %Y at %H:%M:%S UTC")
        )],
    );
    ctx.reply(
        Response::RPL_MYINFO,
        vec![info.name, info.version, "itkol".to_string(), "itkol".to_string()],
    );
}
