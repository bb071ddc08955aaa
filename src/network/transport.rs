//! The transport seam between the multiplexer and the operating system.
//!
//! The gateway never touches sockets directly. It sees readiness reports,
//! accepts new handles, and moves bytes through the [`Transport`] trait, so
//! the same loop runs against `mio` in production and an in-memory script
//! in tests.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use crate::state::ConnId;

/// What a readiness report refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The listening socket has pending connections.
    Listener,
    /// The shutdown waker fired.
    Waker,
    /// A client connection.
    Conn(ConnId),
}

/// One readiness report from [`Transport::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readiness {
    pub source: Source,
    pub readable: bool,
    pub writable: bool,
    /// Error or full hangup on the handle.
    pub closed: bool,
}

/// Result of a single read attempt.
#[derive(Debug)]
pub enum ReadOutcome {
    /// `n` bytes were placed at the front of the buffer.
    Data(usize),
    /// Nothing more to read until the next readiness report.
    WouldBlock,
    /// Orderly shutdown by the peer, or an unknown handle.
    Closed,
    Failed(io::Error),
}

/// Result of a single write attempt.
#[derive(Debug)]
pub enum WriteOutcome {
    /// `n` bytes from the front of the slice were accepted.
    Written(usize),
    WouldBlock,
    Failed(io::Error),
}

/// Non-blocking socket operations used by the gateway.
pub trait Transport {
    /// Wait up to `timeout` for readiness and append what was reported.
    fn poll(&mut self, events: &mut Vec<Readiness>, timeout: Option<Duration>) -> io::Result<()>;

    /// Accept one pending connection, registering it for read readiness.
    ///
    /// `Ok(None)` means the backlog is drained.
    fn accept(&mut self) -> io::Result<Option<(ConnId, SocketAddr)>>;

    fn read(&mut self, conn: ConnId, buf: &mut [u8]) -> ReadOutcome;

    fn write(&mut self, conn: ConnId, data: &[u8]) -> WriteOutcome;

    /// Ask for (or withdraw) writability reports on a connection.
    fn set_write_interest(&mut self, conn: ConnId, enabled: bool) -> io::Result<()>;

    /// Release the handle. Unknown handles are ignored.
    fn close(&mut self, conn: ConnId);
}
