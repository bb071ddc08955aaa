//! Outbound IRC commands.
//!
//! The server only ever originates a handful of verbs, so unlike a client
//! library this enum is not a full command catalog. Inbound lines are never
//! parsed into it; handlers read them through [`MessageRef`](crate::MessageRef).

mod serialize;
pub(crate) mod util;

use crate::response::Response;

/// A command the server sends to clients.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Command {
    /// `NICK :<new nick>`
    NICK(String),
    /// `JOIN <channel>`
    JOIN(String),
    /// `PART <channel> :<reason>`
    PART(String, String),
    /// `QUIT :<reason>`
    QUIT(String),
    /// `PRIVMSG <target> :<text>`
    PRIVMSG(String, String),
    /// `KICK <channel> <nick> :<reason>`
    KICK(String, String, String),
    /// `INVITE <nick> <channel>`
    INVITE(String, String),
    /// `TOPIC <channel> :<topic>`
    TOPIC(String, String),
    /// `MODE <arguments>`, relayed exactly as the requester wrote them.
    MODE(String),
    /// `PING :<token>`
    PING(String),
    /// `PONG <server> :<token>`
    PONG(String, String),
    /// `CAP <target> <subcommand> :<capabilities>`
    CAP(String, String, String),
    /// `ERROR :<text>`
    ERROR(String),
    /// A numeric reply with its arguments, target nickname first.
    Response(Response, Vec<String>),
}

impl Command {
    /// The verb (or zero-padded numeric) as it appears on the wire.
    pub fn name(&self) -> String {
        match self {
            Command::NICK(_) => "NICK".into(),
            Command::JOIN(_) => "JOIN".into(),
            Command::PART(..) => "PART".into(),
            Command::QUIT(_) => "QUIT".into(),
            Command::PRIVMSG(..) => "PRIVMSG".into(),
            Command::KICK(..) => "KICK".into(),
            Command::INVITE(..) => "INVITE".into(),
            Command::TOPIC(..) => "TOPIC".into(),
            Command::MODE(_) => "MODE".into(),
            Command::PING(_) => "PING".into(),
            Command::PONG(..) => "PONG".into(),
            Command::CAP(..) => "CAP".into(),
            Command::ERROR(_) => "ERROR".into(),
            Command::Response(resp, _) => resp.to_string(),
        }
    }
}
