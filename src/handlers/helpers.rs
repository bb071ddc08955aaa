//! Helper functions for IRC command handlers.

use ircserv_proto::{Command, Message, Prefix, Response};

/// Helper to create a server reply message (numeric response).
pub fn server_reply(server_name: &str, response: Response, params: Vec<String>) -> Message {
    Message {
        prefix: Some(Prefix::ServerName(server_name.to_string())),
        command: Command::Response(response, params),
    }
}

/// Split a comma-separated target list, skipping empty entries.
pub fn split_targets(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').filter(|t| !t.is_empty())
}

/// Join the arguments from `from` onward into one free-form reason.
pub fn join_args(args: &[&str], from: usize) -> Option<String> {
    args.get(from..)
        .filter(|rest| !rest.is_empty())
        .map(|rest| rest.join(" "))
}
