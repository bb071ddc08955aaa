//! Unified error handling for ircserv.
//!
//! Command handlers report failures as values. Each error knows the numeric
//! reply that tells the client what went wrong; only [`HandlerError::Quit`]
//! escapes the dispatcher, as the signal to drop the connection.

use ircserv_proto::{Command, Message, Prefix, Response};
use thiserror::Error;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("no nickname given")]
    NoNicknameGiven,

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("erroneous nickname: {0}")]
    ErroneousNickname(String),

    #[error("not registered")]
    NotRegistered,

    #[error("already registered")]
    AlreadyRegistered,

    #[error("password mismatch")]
    PasswordMismatch,

    #[error("no origin specified")]
    NoOrigin,

    #[error("no such nick: {0}")]
    NoSuchNick(String),

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("cannot change mode for other users")]
    UsersDontMatch,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{1} on {0}")]
    Channel(String, ChannelError),

    #[error("client quit: {0:?}")]
    Quit(Option<String>),
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NeedMoreParams => "need_more_params",
            Self::NoNicknameGiven => "no_nickname_given",
            Self::NicknameInUse(_) => "nickname_in_use",
            Self::ErroneousNickname(_) => "erroneous_nickname",
            Self::NotRegistered => "not_registered",
            Self::AlreadyRegistered => "already_registered",
            Self::PasswordMismatch => "password_mismatch",
            Self::NoOrigin => "no_origin",
            Self::NoSuchNick(_) => "no_such_nick",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::UsersDontMatch => "users_dont_match",
            Self::UnknownCommand(_) => "unknown_command",
            Self::Channel(_, e) => e.error_code(),
            Self::Quit(_) => "quit",
        }
    }

    /// Convert to an IRC error reply message.
    ///
    /// Returns `None` for errors that don't warrant a client-visible reply
    /// (quit, internal errors).
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, cmd_name: &str) -> Option<Message> {
        let (response, args) = match self {
            Self::NeedMoreParams => (
                Response::ERR_NEEDMOREPARAMS,
                vec![cmd_name.to_string(), "Not enough parameters".to_string()],
            ),
            Self::NoNicknameGiven => (
                Response::ERR_NONICKNAMEGIVEN,
                vec!["No nickname given".to_string()],
            ),
            Self::NicknameInUse(bad_nick) => (
                Response::ERR_NICKNAMEINUSE,
                vec![bad_nick.clone(), "Nickname is already in use".to_string()],
            ),
            Self::ErroneousNickname(bad_nick) => (
                Response::ERR_ERRONEUSNICKNAME,
                vec![bad_nick.clone(), "Erroneous nickname".to_string()],
            ),
            Self::NotRegistered => (
                Response::ERR_NOTREGISTERED,
                vec!["You have not registered".to_string()],
            ),
            Self::AlreadyRegistered => (
                Response::ERR_ALREADYREGISTERED,
                vec!["You may not reregister".to_string()],
            ),
            Self::PasswordMismatch => (
                Response::ERR_PASSWDMISMATCH,
                vec!["Password incorrect".to_string()],
            ),
            Self::NoOrigin => (
                Response::ERR_NOORIGIN,
                vec!["No origin specified".to_string()],
            ),
            Self::NoSuchNick(target) => (
                Response::ERR_NOSUCHNICK,
                vec![target.clone(), "No such nick/channel".to_string()],
            ),
            Self::NoSuchChannel(bad_chan) => (
                Response::ERR_NOSUCHCHANNEL,
                vec![bad_chan.clone(), "No such channel".to_string()],
            ),
            Self::UsersDontMatch => (
                Response::ERR_USERSDONTMATCH,
                vec!["Cannot change mode for other users".to_string()],
            ),
            Self::UnknownCommand(cmd) => (
                Response::ERR_UNKNOWNCOMMAND,
                vec![cmd.clone(), "Unknown command".to_string()],
            ),
            Self::Channel(channel, e) => return Some(e.to_irc_reply(server_name, nick, channel)),

            // The connection is going away; the farewell replaces any reply.
            Self::Quit(_) => return None,
        };

        let mut params = Vec::with_capacity(args.len() + 1);
        params.push(nick.to_string());
        params.extend(args);
        Some(Message {
            prefix: Some(Prefix::ServerName(server_name.to_string())),
            command: Command::Response(response, params),
        })
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Channel Errors (membership and privilege checks)
// ============================================================================

/// Channel operation errors.
///
/// These errors represent channel-specific failures that can be mapped
/// to RFC-compliant error responses by handler code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("not on channel")]
    NotOnChannel,

    #[error("you're not channel operator")]
    ChanOpPrivsNeeded,

    #[error("user {0} is not on that channel")]
    UserNotInChannel(String),

    #[error("user {0} is already on that channel")]
    UserOnChannel(String),

    #[error("cannot send to channel")]
    CannotSendToChan,

    #[error("cannot join channel (+i)")]
    InviteOnlyChan,

    #[error("cannot join channel (+l)")]
    ChannelIsFull,

    #[error("cannot join channel (+k)")]
    BadChannelKey,

    #[error("cannot kick yourself")]
    CannotKickSelf,

    #[error("cannot change own operator status")]
    CannotChangeOwnStatus,
}

impl ChannelError {
    /// Get a static error code string for log labeling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotOnChannel => "not_on_channel",
            Self::ChanOpPrivsNeeded => "chanop_privs_needed",
            Self::UserNotInChannel(_) => "user_not_in_channel",
            Self::UserOnChannel(_) => "user_on_channel",
            Self::CannotSendToChan => "cannot_send_to_chan",
            Self::InviteOnlyChan => "invite_only_chan",
            Self::ChannelIsFull => "channel_is_full",
            Self::BadChannelKey => "bad_channel_key",
            Self::CannotKickSelf => "cannot_kick_self",
            Self::CannotChangeOwnStatus => "cannot_change_own_status",
        }
    }

    /// Convert to an IRC error reply message.
    pub fn to_irc_reply(&self, server_name: &str, nick: &str, channel: &str) -> Message {
        let (response, args) = match self {
            Self::NotOnChannel => (
                Response::ERR_NOTONCHANNEL,
                vec![nick.to_string(), channel.to_string(), "You're not on that channel".to_string()],
            ),
            Self::ChanOpPrivsNeeded => (
                Response::ERR_CHANOPRIVSNEEDED,
                vec![nick.to_string(), channel.to_string(), "You're not channel operator".to_string()],
            ),
            Self::UserNotInChannel(target) => (
                Response::ERR_USERNOTINCHANNEL,
                vec![nick.to_string(), target.clone(), channel.to_string(), "They aren't on that channel".to_string()],
            ),
            Self::UserOnChannel(target) => (
                Response::ERR_USERONCHANNEL,
                vec![nick.to_string(), target.clone(), channel.to_string(), "is already on channel".to_string()],
            ),
            Self::CannotSendToChan => (
                Response::ERR_CANNOTSENDTOCHAN,
                vec![nick.to_string(), channel.to_string(), "Cannot send to channel".to_string()],
            ),
            Self::InviteOnlyChan => (
                Response::ERR_INVITEONLYCHAN,
                vec![nick.to_string(), channel.to_string(), "Cannot join channel (+i)".to_string()],
            ),
            Self::ChannelIsFull => (
                Response::ERR_CHANNELISFULL,
                vec![nick.to_string(), channel.to_string(), "Cannot join channel (+l)".to_string()],
            ),
            Self::BadChannelKey => (
                Response::ERR_BADCHANNELKEY,
                vec![nick.to_string(), channel.to_string(), "Cannot join channel (+k)".to_string()],
            ),
            Self::CannotKickSelf => (
                Response::ERR_CHANOPRIVSNEEDED,
                vec![nick.to_string(), channel.to_string(), "You cannot kick yourself".to_string()],
            ),
            Self::CannotChangeOwnStatus => (
                Response::ERR_RESTRICTED,
                vec![nick.to_string(), channel.to_string(), "You cannot change your own operator status".to_string()],
            ),
        };

        Message {
            prefix: Some(Prefix::ServerName(server_name.to_string())),
            command: Command::Response(response, args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_codes() {
        assert_eq!(HandlerError::NeedMoreParams.error_code(), "need_more_params");
        assert_eq!(HandlerError::NotRegistered.error_code(), "not_registered");
        assert_eq!(
            HandlerError::Channel("#a".into(), ChannelError::BadChannelKey).error_code(),
            "bad_channel_key"
        );
    }

    #[test]
    fn test_handler_error_to_irc_reply() {
        let reply = HandlerError::NeedMoreParams
            .to_irc_reply("ircserv", "alice", "JOIN")
            .unwrap();
        assert_eq!(
            reply.to_string(),
            ":ircserv 461 alice JOIN :Not enough parameters\r\n"
        );

        let reply = HandlerError::NotRegistered.to_irc_reply("ircserv", "*", "JOIN").unwrap();
        assert_eq!(reply.to_string(), ":ircserv 451 * :You have not registered\r\n");

        // Quit produces no reply
        assert!(HandlerError::Quit(None).to_irc_reply("ircserv", "alice", "QUIT").is_none());
    }

    #[test]
    fn test_channel_error_to_irc_reply() {
        let reply = ChannelError::NotOnChannel.to_irc_reply("ircserv", "alice", "#test");
        assert!(matches!(reply.command, Command::Response(Response::ERR_NOTONCHANNEL, _)));

        let reply = HandlerError::Channel("#test".into(), ChannelError::UserNotInChannel("bob".into()))
            .to_irc_reply("ircserv", "alice", "KICK")
            .unwrap();
        assert_eq!(
            reply.to_string(),
            ":ircserv 441 alice bob #test :They aren't on that channel\r\n"
        );
    }
}
