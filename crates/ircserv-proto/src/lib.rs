//! # ircserv-proto
//!
//! Wire-level building blocks for the `ircserv` chat server: line framing,
//! command tokenizing, outbound message serialization, numeric replies and
//! nickname/channel-name validation.
//!
//! ## Parsing
//!
//! ```rust
//! use ircserv_proto::MessageRef;
//!
//! let msg = MessageRef::parse("privmsg #rust :hello there").unwrap();
//! assert_eq!(msg.command_name(), "privmsg");
//! assert_eq!(msg.arg(0), Some("#rust"));
//! assert_eq!(msg.arg(1), Some("hello there"));
//! ```
//!
//! ## Building replies
//!
//! ```rust
//! use ircserv_proto::{Command, Message, Prefix, Response};
//!
//! let reply = Message::from(Command::Response(
//!     Response::RPL_WELCOME,
//!     vec!["alice".into(), "Welcome to the IRC network alice!a@host".into()],
//! ))
//! .with_prefix(Prefix::ServerName("ircserv".into()));
//!
//! assert_eq!(
//!     reply.to_string(),
//!     ":ircserv 001 alice :Welcome to the IRC network alice!a@host\r\n"
//! );
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod chan;
pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod nick;
pub mod prefix;
pub mod response;

pub use self::chan::ChannelExt;
pub use self::command::Command;
pub use self::error::{MessageParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;
pub use self::message::{Message, MessageRef};
pub use self::nick::NickExt;
pub use self::prefix::Prefix;
pub use self::response::Response;
