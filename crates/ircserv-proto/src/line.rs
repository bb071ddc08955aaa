//! Line-based codec for tokio.
//!
//! Frames a byte stream into protocol lines. CRLF is the canonical
//! terminator; a bare LF is accepted from sloppy clients.

use std::fmt::Write as _;

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error;
use crate::message::Message;

/// Line-based codec that handles newline-terminated messages.
///
/// The codec never rejects a line for its length. Buffer caps belong to the
/// connection owning the buffer, which knows how much partial input it is
/// willing to hold.
#[derive(Debug, Default)]
pub struct LineCodec {
    /// Index of next byte to check for a terminator
    next_index: usize,
}

impl LineCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locate the end of the first complete line as `(line_len, terminator_len)`.
    fn find_terminator(&self, src: &[u8]) -> Option<(usize, usize)> {
        let start = self.next_index.min(src.len());
        // A CR just before the cursor may start a CRLF split across reads.
        let start = start.saturating_sub(1);
        if let Some(pos) = src[start..].windows(2).position(|w| w == b"\r\n") {
            return Some((start + pos, 2));
        }
        src[start..]
            .iter()
            .position(|b| *b == b'\n')
            .map(|pos| (start + pos, 1))
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        loop {
            let Some((len, term)) = self.find_terminator(src) else {
                // No complete line yet - remember where we stopped
                self.next_index = src.len();
                return Ok(None);
            };

            let line = src.split_to(len + term);
            self.next_index = 0;

            let text = String::from_utf8_lossy(&line[..len]);
            let trimmed = text.trim_matches(|c: char| c.is_whitespace());
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_owned()));
            }
        }
    }
}

impl Encoder<Message> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: Message, dst: &mut BytesMut) -> error::Result<()> {
        Encoder::<&Message>::encode(self, &msg, dst)
    }
}

impl<'a> Encoder<&'a Message> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: &'a Message, dst: &mut BytesMut) -> error::Result<()> {
        let mut line = String::new();
        if write!(line, "{msg}").is_err() {
            return Err(error::ProtocolError::IllegalArgument(format!("{msg:?}")));
        }
        dst.extend_from_slice(line.as_bytes());
        Ok(())
    }
}
