//! Zero-copy tokenizer for inbound lines.
//!
//! Inbound lines are one `VERB p1 p2 :trailing` command each. Client-sent
//! prefixes and IRCv3 tags are not recognized; the first word is always the
//! verb.
//!
//! # Example
//!
//! ```
//! use ircserv_proto::message::MessageRef;
//!
//! let msg = MessageRef::parse("KICK #rust bob :too loud").unwrap();
//! assert_eq!(msg.command_name(), "KICK");
//! assert_eq!(msg.args(), &["#rust", "bob", "too loud"]);
//! ```

use crate::error::MessageParseError;

/// A tokenized line borrowing from the original input.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MessageRef<'a> {
    command: &'a str,
    args: Vec<&'a str>,
    raw_args: &'a str,
    /// The trimmed line.
    pub raw: &'a str,
}

impl<'a> MessageRef<'a> {
    /// Tokenize one line.
    ///
    /// The text up to the first space is the verb. In the remainder the first
    /// `" :"` separates space-delimited parameters from one verbatim trailing
    /// parameter; a remainder that itself starts with `:` is entirely
    /// trailing. An empty trailing parameter is dropped.
    ///
    /// Lines carrying CR, LF or NUL are refused: any parameter could be
    /// echoed back later, and such bytes cannot be encoded.
    #[must_use = "parsing result should be handled"]
    pub fn parse(s: &'a str) -> Result<MessageRef<'a>, MessageParseError> {
        let line = s.trim_matches(|c: char| c.is_whitespace());
        if line.is_empty() {
            return Err(MessageParseError::EmptyMessage);
        }
        if line.bytes().any(|b| matches!(b, b'\r' | b'\n' | 0)) {
            return Err(MessageParseError::IllegalCharacter);
        }

        let (command, raw_args) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest),
            None => (line, ""),
        };
        if command.is_empty() {
            return Err(MessageParseError::MissingCommand);
        }

        let (middle, trailing) = if let Some(t) = raw_args.strip_prefix(':') {
            ("", Some(t))
        } else if let Some((m, t)) = raw_args.split_once(" :") {
            (m, Some(t))
        } else {
            (raw_args, None)
        };

        let mut args: Vec<&'a str> = middle.split_whitespace().collect();
        if let Some(t) = trailing.filter(|t| !t.is_empty()) {
            args.push(t);
        }

        Ok(MessageRef {
            command,
            args,
            raw_args,
            raw: line,
        })
    }

    /// Get the command name exactly as sent.
    #[inline]
    pub fn command_name(&self) -> &'a str {
        self.command
    }

    /// Get the command arguments.
    #[inline]
    pub fn args(&self) -> &[&'a str] {
        &self.args
    }

    /// Get a specific argument by index.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }

    /// Everything after the verb, untouched.
    #[inline]
    pub fn raw_args(&self) -> &'a str {
        self.raw_args
    }
}
