//! Scripted in-memory [`Transport`] for gateway tests.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use super::transport::{ReadOutcome, Readiness, Source, Transport, WriteOutcome};
use crate::state::{ConnId, ConnIdGenerator};

fn readable(source: Source) -> Readiness {
    Readiness {
        source,
        readable: true,
        writable: false,
        closed: false,
    }
}

#[derive(Debug, Default)]
struct MockConn {
    inbound: VecDeque<u8>,
    eof: bool,
    written: Vec<u8>,
    /// Bytes the peer will accept before writes block; `None` is unlimited.
    budget: Option<usize>,
    write_interest: bool,
}

#[derive(Debug, Default)]
pub struct MockTransport {
    ids: ConnIdGenerator,
    backlog: VecDeque<(ConnId, SocketAddr)>,
    ready: Vec<Readiness>,
    conns: HashMap<ConnId, MockConn>,
    closed: Vec<ConnId>,
    accept_failures: VecDeque<io::ErrorKind>,
}

impl MockTransport {
    /// Queue an incoming connection.
    pub fn connect(&mut self) -> ConnId {
        let id = self.ids.next_id();
        let addr = SocketAddr::from(([127, 0, 0, 1], 40000 + id.0 as u16));
        self.backlog.push_back((id, addr));
        self.conns.insert(id, MockConn::default());
        self.ready.push(readable(Source::Listener));
        id
    }

    /// Make the next `accept` fail with `kind`, leaving the backlog queued.
    pub fn fail_next_accept(&mut self, kind: io::ErrorKind) {
        self.accept_failures.push_back(kind);
    }

    /// Deliver bytes from the peer.
    pub fn push_input(&mut self, id: ConnId, data: &[u8]) {
        if let Some(conn) = self.conns.get_mut(&id) {
            conn.inbound.extend(data);
            self.ready.push(readable(Source::Conn(id)));
        }
    }

    /// The peer closes its end.
    pub fn hang_up(&mut self, id: ConnId) {
        if let Some(conn) = self.conns.get_mut(&id) {
            conn.eof = true;
            self.ready.push(readable(Source::Conn(id)));
        }
    }

    pub fn set_budget(&mut self, id: ConnId, budget: Option<usize>) {
        if let Some(conn) = self.conns.get_mut(&id) {
            conn.budget = budget;
        }
    }

    /// Report the connection writable on the next poll.
    pub fn make_writable(&mut self, id: ConnId) {
        self.ready.push(Readiness {
            source: Source::Conn(id),
            readable: false,
            writable: true,
            closed: false,
        });
    }

    /// Everything the server wrote since the last call.
    pub fn take_written(&mut self, id: ConnId) -> String {
        self.conns
            .get_mut(&id)
            .map(|c| String::from_utf8_lossy(&std::mem::take(&mut c.written)).into_owned())
            .unwrap_or_default()
    }

    pub fn write_interest(&self, id: ConnId) -> bool {
        self.conns.get(&id).is_some_and(|c| c.write_interest)
    }

    pub fn is_closed(&self, id: ConnId) -> bool {
        self.closed.contains(&id)
    }
}

impl Transport for MockTransport {
    fn poll(&mut self, events: &mut Vec<Readiness>, _timeout: Option<Duration>) -> io::Result<()> {
        events.append(&mut self.ready);
        Ok(())
    }

    fn accept(&mut self) -> io::Result<Option<(ConnId, SocketAddr)>> {
        if let Some(kind) = self.accept_failures.pop_front() {
            return Err(kind.into());
        }
        Ok(self.backlog.pop_front())
    }

    fn read(&mut self, conn: ConnId, buf: &mut [u8]) -> ReadOutcome {
        let Some(c) = self.conns.get_mut(&conn) else {
            return ReadOutcome::Closed;
        };
        if c.inbound.is_empty() {
            return if c.eof {
                ReadOutcome::Closed
            } else {
                ReadOutcome::WouldBlock
            };
        }
        let n = buf.len().min(c.inbound.len());
        for (slot, byte) in buf.iter_mut().zip(c.inbound.drain(..n)) {
            *slot = byte;
        }
        ReadOutcome::Data(n)
    }

    fn write(&mut self, conn: ConnId, data: &[u8]) -> WriteOutcome {
        let Some(c) = self.conns.get_mut(&conn) else {
            return WriteOutcome::Failed(io::ErrorKind::NotConnected.into());
        };
        let n = match c.budget {
            Some(0) => return WriteOutcome::WouldBlock,
            Some(budget) => {
                let n = budget.min(data.len());
                c.budget = Some(budget - n);
                n
            }
            None => data.len(),
        };
        c.written.extend_from_slice(&data[..n]);
        WriteOutcome::Written(n)
    }

    fn set_write_interest(&mut self, conn: ConnId, enabled: bool) -> io::Result<()> {
        if let Some(c) = self.conns.get_mut(&conn) {
            c.write_interest = enabled;
        }
        Ok(())
    }

    fn close(&mut self, conn: ConnId) {
        self.closed.push(conn);
    }
}
