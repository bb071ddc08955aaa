//! Per-connection session state.
//!
//! ## Registration
//!
//! ```text
//! ┌──────────────┐  PASS ok  ┌─────────────┐  NICK + USER  ┌────────────┐
//! │ Unregistered │ ────────▶ │ PasswordSet │ ────────────▶ │ Registered │
//! └──────────────┘           └─────────────┘ (either order)└────────────┘
//! ```
//!
//! NICK and USER may also arrive before PASS; the session only registers once
//! all three have been accepted, and never leaves `Registered` afterwards.

use bytes::BytesMut;
use ircserv_proto::{LineCodec, Prefix};
use std::net::SocketAddr;
use std::time::Instant;

use super::ConnId;

/// PASS/NICK/USER progress.
#[derive(Debug, Default, Clone)]
pub struct Registration {
    pub password: bool,
    pub nick: bool,
    pub user: bool,
    complete: bool,
}

impl Registration {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Promote to registered once all three steps are done.
    ///
    /// Returns `true` only on the call that performs the transition, so the
    /// welcome burst is sent exactly once.
    pub fn try_complete(&mut self) -> bool {
        if self.complete || !(self.password && self.nick && self.user) {
            return false;
        }
        self.complete = true;
        true
    }
}

/// A connected client.
#[derive(Debug)]
pub struct Session {
    pub id: ConnId,
    pub nick: Option<String>,
    pub user: Option<String>,
    pub realname: Option<String>,
    pub host: String,
    pub registration: Registration,
    /// Bytes received but not yet framed into lines.
    pub input: BytesMut,
    /// Encoded lines waiting for the socket to accept them.
    pub output: BytesMut,
    pub codec: LineCodec,
    pub connected_at: Instant,
    pub last_activity: Instant,
    pub ping_pending: bool,
    pub ping_sent_at: Option<Instant>,
}

impl Session {
    pub fn new(id: ConnId, addr: SocketAddr, now: Instant) -> Self {
        Self {
            id,
            nick: None,
            user: None,
            realname: None,
            host: addr.ip().to_string(),
            registration: Registration::default(),
            input: BytesMut::with_capacity(512),
            output: BytesMut::new(),
            codec: LineCodec::new(),
            connected_at: now,
            last_activity: now,
            ping_pending: false,
            ping_sent_at: None,
        }
    }

    #[inline]
    pub fn is_registered(&self) -> bool {
        self.registration.is_complete()
    }

    /// Get the nick or "*" for replies.
    pub fn nick_or_star(&self) -> &str {
        self.nick.as_deref().unwrap_or("*")
    }

    /// The `nick!user@host` source used on messages this client originates.
    pub fn prefix(&self) -> Prefix {
        Prefix::new(
            self.nick_or_star(),
            self.user.as_deref().unwrap_or("*"),
            self.host.as_str(),
        )
    }

    /// Record inbound traffic: resets the idle clock and settles any
    /// outstanding keepalive.
    pub fn touch(&mut self, now: Instant) {
        self.last_activity = now;
        self.ping_pending = false;
        self.ping_sent_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "10.0.0.7:50000".parse().unwrap()
    }

    #[test]
    fn test_registration_any_order() {
        let mut reg = Registration::default();
        reg.nick = true;
        reg.user = true;
        assert!(!reg.try_complete());
        assert!(!reg.is_complete());

        reg.password = true;
        assert!(reg.try_complete());
        // Sticky, and only reported once.
        assert!(!reg.try_complete());
        assert!(reg.is_complete());
    }

    #[test]
    fn test_pass_alone_does_not_register() {
        let mut reg = Registration {
            password: true,
            ..Default::default()
        };
        assert!(!reg.try_complete());
        assert!(!reg.is_complete());
    }

    #[test]
    fn test_prefix_uses_placeholders() {
        let now = Instant::now();
        let mut session = Session::new(ConnId(9), addr(), now);
        assert_eq!(session.prefix().to_string(), "*!*@10.0.0.7");

        session.nick = Some("alice".into());
        session.user = Some("al".into());
        assert_eq!(session.prefix().to_string(), "alice!al@10.0.0.7");
    }

    #[test]
    fn test_touch_clears_ping() {
        let start = Instant::now();
        let mut session = Session::new(ConnId(2), addr(), start);
        session.ping_pending = true;
        session.ping_sent_at = Some(start);

        let later = start + std::time::Duration::from_secs(5);
        session.touch(later);
        assert!(!session.ping_pending);
        assert_eq!(session.last_activity, later);
    }
}
