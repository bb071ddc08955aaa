//! Command handler context.

use std::time::Instant;

use ircserv_proto::{Command, Message, Prefix, Response};

use crate::error::HandlerError;
use crate::handlers::server_reply;
use crate::state::{ConnId, Matrix, Session};

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The connection the command arrived on.
    pub conn: ConnId,
    /// Server state.
    pub matrix: &'a mut Matrix,
    /// Time the line was read, for activity bookkeeping.
    pub now: Instant,
}

impl<'a> Context<'a> {
    pub fn new(conn: ConnId, matrix: &'a mut Matrix, now: Instant) -> Self {
        Self { conn, matrix, now }
    }

    /// The requesting session.
    ///
    /// The multiplexer only dispatches for live sessions, and no handler
    /// removes its own requester, so this resolves for the whole call.
    pub fn session(&self) -> Option<&Session> {
        self.matrix.session(self.conn)
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.matrix.session_mut(self.conn)
    }

    pub fn server_name(&self) -> &str {
        &self.matrix.server_info.name
    }

    /// Requester's nick or "*" before one is set.
    pub fn nick(&self) -> String {
        self.session()
            .map(|s| s.nick_or_star().to_string())
            .unwrap_or_else(|| "*".to_string())
    }

    /// Requester's `nick!user@host`.
    pub fn prefix(&self) -> Prefix {
        self.session()
            .map(Session::prefix)
            .unwrap_or_else(|| Prefix::ServerName(self.server_name().to_string()))
    }

    pub fn is_registered(&self) -> bool {
        self.session().is_some_and(Session::is_registered)
    }

    /// Queue a message for the requester.
    pub fn send(&mut self, msg: Message) {
        self.matrix.send_to(self.conn, &msg);
    }

    /// Queue a numeric for the requester, addressed to its current nick.
    pub fn reply(&mut self, response: Response, args: Vec<String>) {
        let mut params = Vec::with_capacity(args.len() + 1);
        params.push(self.nick());
        params.extend(args);
        let msg = server_reply(self.server_name(), response, params);
        self.send(msg);
    }

    /// Answer a failed command (or one target of a batched command) with
    /// its numeric.
    pub fn send_error(&mut self, err: HandlerError, cmd_name: &str) {
        if let Some(reply) = err.to_irc_reply(self.server_name(), &self.nick(), cmd_name) {
            self.send(reply);
        }
    }

    /// A message originated by the requester, for relaying to others.
    pub fn from_user(&self, command: Command) -> Message {
        Message::from(command).with_prefix(self.prefix())
    }
}
