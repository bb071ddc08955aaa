//! Error types for the protocol crate.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Errors raised while framing or encoding lines.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error surfaced through the codec traits.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An outbound argument would have split the line (CR, LF or NUL).
    #[error("argument contains a line break or NUL: {0:?}")]
    IllegalArgument(String),
}

/// Errors raised while tokenizing a single line.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageParseError {
    /// The line was empty after trimming.
    #[error("empty message")]
    EmptyMessage,

    /// The line had no command word.
    #[error("missing command")]
    MissingCommand,

    /// The line carries a byte no outbound line may contain (CR, LF or NUL).
    #[error("illegal character in message")]
    IllegalCharacter,
}
