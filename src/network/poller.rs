//! `mio` implementation of [`Transport`].

use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mio::net::{TcpListener, TcpStream};
use mio::{Events, Interest, Poll, Token, Waker};
use tracing::{debug, warn};

use super::transport::{ReadOutcome, Readiness, Source, Transport, WriteOutcome};
use crate::state::{ConnId, ConnIdGenerator};

const LISTENER: Token = Token(0);
const WAKER: Token = Token(1);

/// Readiness-driven sockets over `mio`.
///
/// Notifications are edge-triggered: the gateway drains accept, read and
/// write until they would block.
pub struct MioTransport {
    poll: Poll,
    events: Events,
    listener: TcpListener,
    streams: HashMap<ConnId, TcpStream>,
    ids: ConnIdGenerator,
    waker: Arc<Waker>,
}

impl MioTransport {
    /// Bind the listening socket and set up the poller.
    pub fn bind(addr: SocketAddr, max_events: usize) -> io::Result<Self> {
        let poll = Poll::new()?;
        let mut listener = TcpListener::bind(addr)?;
        poll.registry()
            .register(&mut listener, LISTENER, Interest::READABLE)?;
        let waker = Arc::new(Waker::new(poll.registry(), WAKER)?);

        Ok(Self {
            poll,
            events: Events::with_capacity(max_events),
            listener,
            streams: HashMap::new(),
            ids: ConnIdGenerator::new(),
            waker,
        })
    }

    /// Handle used to interrupt a blocking poll from another thread.
    pub fn waker(&self) -> Arc<Waker> {
        Arc::clone(&self.waker)
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

impl Transport for MioTransport {
    fn poll(&mut self, out: &mut Vec<Readiness>, timeout: Option<Duration>) -> io::Result<()> {
        match self.poll.poll(&mut self.events, timeout) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(()),
            Err(e) => return Err(e),
        }

        for event in self.events.iter() {
            let source = match event.token() {
                LISTENER => Source::Listener,
                WAKER => Source::Waker,
                Token(n) => Source::Conn(ConnId(n)),
            };
            out.push(Readiness {
                source,
                readable: event.is_readable(),
                writable: event.is_writable(),
                closed: event.is_error() || (event.is_read_closed() && event.is_write_closed()),
            });
        }
        Ok(())
    }

    fn accept(&mut self) -> io::Result<Option<(ConnId, SocketAddr)>> {
        loop {
            match self.listener.accept() {
                Ok((mut stream, addr)) => {
                    let id = self.ids.next_id();
                    if let Err(e) =
                        self.poll
                            .registry()
                            .register(&mut stream, Token(id.0), Interest::READABLE)
                    {
                        warn!(%addr, error = %e, "Failed to register connection");
                        continue;
                    }
                    if let Err(e) = stream.set_nodelay(true) {
                        debug!(conn = %id, error = %e, "Failed to set TCP_NODELAY");
                    }
                    self.streams.insert(id, stream);
                    return Ok(Some((id, addr)));
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(None),
                // Interrupted, or this peer gave up while queued; keep draining.
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::Interrupted
                            | io::ErrorKind::ConnectionAborted
                            | io::ErrorKind::ConnectionReset
                    ) =>
                {
                    continue;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn read(&mut self, conn: ConnId, buf: &mut [u8]) -> ReadOutcome {
        let Some(stream) = self.streams.get_mut(&conn) else {
            return ReadOutcome::Closed;
        };
        loop {
            match stream.read(buf) {
                Ok(0) => return ReadOutcome::Closed,
                Ok(n) => return ReadOutcome::Data(n),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return ReadOutcome::WouldBlock,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return ReadOutcome::Failed(e),
            }
        }
    }

    fn write(&mut self, conn: ConnId, data: &[u8]) -> WriteOutcome {
        let Some(stream) = self.streams.get_mut(&conn) else {
            return WriteOutcome::Failed(io::ErrorKind::NotConnected.into());
        };
        loop {
            match stream.write(data) {
                Ok(0) if !data.is_empty() => {
                    return WriteOutcome::Failed(io::ErrorKind::WriteZero.into());
                }
                Ok(n) => return WriteOutcome::Written(n),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return WriteOutcome::WouldBlock,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return WriteOutcome::Failed(e),
            }
        }
    }

    fn set_write_interest(&mut self, conn: ConnId, enabled: bool) -> io::Result<()> {
        let Some(stream) = self.streams.get_mut(&conn) else {
            return Ok(());
        };
        let interest = if enabled {
            Interest::READABLE | Interest::WRITABLE
        } else {
            Interest::READABLE
        };
        self.poll
            .registry()
            .reregister(stream, Token(conn.0), interest)
    }

    fn close(&mut self, conn: ConnId) {
        if let Some(mut stream) = self.streams.remove(&conn) {
            if let Err(e) = self.poll.registry().deregister(&mut stream) {
                warn!(conn = %conn, error = %e, "Failed to deregister connection");
            }
        }
    }
}
