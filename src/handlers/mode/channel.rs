//! Channel MODE handling.
//!
//! Supported flags: `i` (invite-only), `t` (topic restricted to operators),
//! `k <key>`, `o <nick>` and `l <limit>`. Parameters are consumed left to
//! right by `+k`, `+l` and `±o`; unknown letters are skipped.

use crate::error::{ChannelError, HandlerError, HandlerResult};
use crate::handlers::Context;
use crate::state::Channel;
use ircserv_proto::{Command, MessageRef, Response};
use tracing::debug;

/// Largest member limit `+l` accepts, exclusive.
const MAX_CHANNEL_LIMIT: usize = 10_000;

pub(super) fn handle_channel_mode(ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
    let Some(name) = msg.arg(0) else {
        return Err(HandlerError::NeedMoreParams);
    };
    let Some(channel) = ctx.matrix.channel(name) else {
        return Err(HandlerError::NoSuchChannel(name.to_string()));
    };

    let Some(flags) = msg.arg(1) else {
        let mut params = vec![name.to_string()];
        params.extend(channel.mode_params());
        ctx.reply(Response::RPL_CHANNELMODEIS, params);
        return Ok(());
    };

    if !channel.is_operator(ctx.conn) {
        return Err(HandlerError::Channel(name.to_string(), ChannelError::ChanOpPrivsNeeded));
    }

    let mut params = msg.args().iter().skip(2).copied();
    let mut adding = true;
    for flag in flags.chars() {
        match flag {
            '+' => adding = true,
            '-' => adding = false,
            'i' => set_flag(ctx, name, |c| c.invite_only = adding),
            't' => set_flag(ctx, name, |c| c.topic_restricted = adding),
            'k' if adding => {
                if let Some(key) = params.next().filter(|k| !k.is_empty()) {
                    set_flag(ctx, name, |c| c.key = Some(key.to_string()));
                }
            }
            'k' => set_flag(ctx, name, |c| c.key = None),
            'l' if adding => {
                let limit = params
                    .next()
                    .and_then(|p| p.parse::<usize>().ok())
                    .filter(|n| (1..MAX_CHANNEL_LIMIT).contains(n));
                if let Some(limit) = limit {
                    set_flag(ctx, name, |c| c.limit = limit);
                }
            }
            'l' => set_flag(ctx, name, |c| c.limit = 0),
            'o' => {
                let Some(target) = params.next() else {
                    continue;
                };
                if let Err(e) = change_operator(ctx, name, target, adding) {
                    ctx.send_error(e, "MODE");
                }
            }
            _ => {}
        }
    }

    debug!(conn = %ctx.conn, channel = %name, flags = %flags, "Channel modes changed");
    let relay = ctx.from_user(Command::MODE(msg.raw_args().to_string()));
    ctx.matrix.broadcast(name, &relay, None);
    Ok(())
}

fn set_flag(ctx: &mut Context<'_>, name: &str, apply: impl FnOnce(&mut Channel)) {
    if let Some(channel) = ctx.matrix.channel_mut(name) {
        apply(channel);
    }
}

fn change_operator(ctx: &mut Context<'_>, name: &str, nick: &str, adding: bool) -> HandlerResult {
    let channel_err = |e| HandlerError::Channel(name.to_string(), e);

    let target = ctx
        .matrix
        .find_nick(nick)
        .ok_or_else(|| HandlerError::NoSuchNick(nick.to_string()))?;
    let is_member = ctx.matrix.channel(name).is_some_and(|c| c.is_member(target));
    if !is_member {
        return Err(channel_err(ChannelError::UserNotInChannel(nick.to_string())));
    }
    if target == ctx.conn {
        return Err(channel_err(ChannelError::CannotChangeOwnStatus));
    }

    set_flag(ctx, name, |c| {
        if adding {
            c.add_operator(target);
        } else {
            c.remove_operator(target);
        }
    });
    Ok(())
}
