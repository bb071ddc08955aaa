//! Command handler registry and dispatch.
//!
//! The `Registry` routes verbs to handlers and keeps command usage counts.

use super::context::Context;
use super::traits::Handler;
use crate::error::{HandlerError, HandlerResult};
use crate::handlers::{
    channel::{InviteHandler, JoinHandler, KickHandler, PartHandler, TopicHandler},
    connection::{
        CapHandler, NickHandler, PassHandler, PingHandler, PongHandler, QuitHandler, UserHandler,
    },
    messaging::PrivmsgHandler,
    mode::ModeHandler,
};
use ircserv_proto::MessageRef;
use std::collections::HashMap;
use tracing::debug;

/// Registry of command handlers.
pub struct Registry {
    /// Commands accepted in any registration phase.
    universal: HashMap<&'static str, Box<dyn Handler>>,
    /// Commands that require a registered client.
    post_reg: HashMap<&'static str, Box<dyn Handler>>,
    /// Command usage counters.
    command_counts: HashMap<&'static str, u64>,
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut universal: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        // Connection/registration handlers
        universal.insert("PASS", Box::new(PassHandler));
        universal.insert("NICK", Box::new(NickHandler));
        universal.insert("USER", Box::new(UserHandler));
        universal.insert("CAP", Box::new(CapHandler));
        universal.insert("PING", Box::new(PingHandler));
        universal.insert("PONG", Box::new(PongHandler));
        universal.insert("QUIT", Box::new(QuitHandler));

        let mut post_reg: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();

        // Channel handlers
        post_reg.insert("JOIN", Box::new(JoinHandler));
        post_reg.insert("PART", Box::new(PartHandler));
        post_reg.insert("KICK", Box::new(KickHandler));
        post_reg.insert("INVITE", Box::new(InviteHandler));
        post_reg.insert("TOPIC", Box::new(TopicHandler));
        post_reg.insert("MODE", Box::new(ModeHandler));

        // Messaging handlers
        post_reg.insert("PRIVMSG", Box::new(PrivmsgHandler));

        let command_counts = universal
            .keys()
            .chain(post_reg.keys())
            .map(|&cmd| (cmd, 0))
            .collect();

        Self {
            universal,
            post_reg,
            command_counts,
        }
    }

    /// Get command usage statistics, most used first.
    pub fn command_stats(&self) -> Vec<(&'static str, u64)> {
        let mut stats: Vec<_> = self
            .command_counts
            .iter()
            .map(|(cmd, count)| (*cmd, *count))
            .filter(|(_, count)| *count > 0)
            .collect();

        stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        stats
    }

    /// Dispatch a message to the appropriate handler.
    ///
    /// Command failures are answered here with their numeric reply. Only
    /// [`HandlerError::Quit`] is returned to the caller.
    pub fn dispatch(&mut self, ctx: &mut Context<'_>, msg: &MessageRef<'_>) -> HandlerResult {
        let cmd_name = msg.command_name().to_ascii_uppercase();
        let registered = ctx.is_registered();

        let result = if let Some((&name, handler)) = self.universal.get_key_value(cmd_name.as_str()) {
            Self::count(&mut self.command_counts, name);
            handler.handle(ctx, msg)
        } else if !registered {
            Err(HandlerError::NotRegistered)
        } else if let Some((&name, handler)) = self.post_reg.get_key_value(cmd_name.as_str()) {
            Self::count(&mut self.command_counts, name);
            handler.handle(ctx, msg)
        } else {
            Err(HandlerError::UnknownCommand(cmd_name.clone()))
        };

        match result {
            Ok(()) => Ok(()),
            Err(HandlerError::Quit(reason)) => Err(HandlerError::Quit(reason)),
            Err(e) => {
                debug!(conn = %ctx.conn, command = %cmd_name, error = %e, code = e.error_code(), "Command error");
                ctx.send_error(e, &cmd_name);
                Ok(())
            }
        }
    }

    fn count(counts: &mut HashMap<&'static str, u64>, name: &'static str) {
        *counts.entry(name).or_insert(0) += 1;
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
