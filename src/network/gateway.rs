//! Gateway - the readiness-driven connection multiplexer.
//!
//! One thread owns the [`Matrix`] and every socket. Each turn waits for
//! readiness, reads and dispatches complete lines, flushes queued output,
//! drops evicted sessions and runs the idle sweep. Handlers run to
//! completion between readiness waits, so no state is ever shared.

use std::collections::HashSet;
use std::io;
use std::time::{Duration, Instant};

use bytes::Buf;
use ircserv_proto::{Command, Message, MessageRef};
use tokio_util::codec::Decoder;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::idle::{IdleAction, IdleMonitor};
use super::transport::{ReadOutcome, Readiness, Source, Transport, WriteOutcome};
use crate::config::Config;
use crate::error::HandlerError;
use crate::handlers::{Context, Registry};
use crate::state::{ConnId, Matrix, Session};
use crate::telemetry::{CommandTimer, spans};

const DEFAULT_QUIT_REASON: &str = "Client Quit";

/// The multiplexer, generic over its socket layer.
pub struct Gateway<T: Transport> {
    transport: T,
    matrix: Matrix,
    registry: Registry,
    idle: IdleMonitor,
    events: Vec<Readiness>,
    read_buf: Vec<u8>,
    max_input: usize,
    poll_interval: Duration,
    /// Connections currently asking for writability reports.
    write_interest: HashSet<ConnId>,
    /// The listener failed mid-drain; its backlog gets no new edge, so the
    /// next turn drains it again.
    accept_retry: bool,
}

impl<T: Transport> Gateway<T> {
    pub fn new(transport: T, matrix: Matrix, config: &Config) -> Self {
        Self {
            transport,
            matrix,
            registry: Registry::new(),
            idle: IdleMonitor::new(&config.server.idle_timeouts),
            events: Vec::with_capacity(config.limits.max_events),
            read_buf: vec![0; config.limits.read_chunk],
            max_input: config.limits.max_input_buffer,
            poll_interval: Duration::from_millis(config.limits.poll_interval_ms),
            write_interest: HashSet::new(),
            accept_retry: false,
        }
    }

    #[cfg(test)]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    #[cfg(test)]
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Run until `shutdown` is cancelled, then close every connection.
    ///
    /// The token is checked once per turn; whoever cancels it should also
    /// wake the transport so a blocking poll returns promptly.
    #[instrument(skip_all, name = "gateway")]
    pub fn run(&mut self, shutdown: &CancellationToken) -> io::Result<()> {
        info!("Gateway running");
        while !shutdown.is_cancelled() {
            self.wait()?;
            self.turn(Instant::now());
        }
        self.shutdown();
        Ok(())
    }

    /// Block for readiness, up to the poll interval.
    pub fn wait(&mut self) -> io::Result<()> {
        self.transport.poll(&mut self.events, Some(self.poll_interval))
    }

    /// Process everything the last [`wait`](Self::wait) reported, then run
    /// the idle sweep at `now`.
    ///
    /// An accept that failed on an earlier turn is retried first.
    pub fn turn(&mut self, now: Instant) {
        if self.accept_retry {
            self.accept_all(now);
        }
        let mut events = std::mem::take(&mut self.events);
        for event in events.drain(..) {
            self.handle_event(event, now);
        }
        self.events = events;
        self.settle();

        for action in self.idle.sweep(&self.matrix, now) {
            match action {
                IdleAction::Ping(id) => self.send_keepalive(id, now),
                IdleAction::Evict(id, reason) => {
                    warn!(conn = %id, reason = %reason, "Idle eviction");
                    self.disconnect(id, &reason, true);
                }
            }
        }
        self.settle();
    }

    /// Say goodbye to every client and release all state.
    pub fn shutdown(&mut self) {
        info!(sessions = self.matrix.session_count(), "Shutting down");
        for (command, count) in self.registry.command_stats() {
            debug!(command, count, "Command usage");
        }

        for id in self.matrix.session_ids() {
            self.send_farewell(id, "Server shutting down");
            self.transport.close(id);
        }
        self.matrix.clear();
        self.write_interest.clear();
    }

    fn handle_event(&mut self, event: Readiness, now: Instant) {
        let id = match event.source {
            Source::Listener => {
                self.accept_all(now);
                return;
            }
            Source::Waker => {
                debug!("Poll woken");
                return;
            }
            Source::Conn(id) => id,
        };
        let Some(session) = self.matrix.session(id) else {
            return;
        };
        let _span = spans::connection(id, &session.host).entered();

        if event.readable {
            self.on_readable(id, now);
        }
        if event.writable {
            self.flush_or_drop(id);
        }
        if event.closed && self.matrix.session(id).is_some() {
            self.disconnect(id, "Connection reset", false);
        }
    }

    fn accept_all(&mut self, now: Instant) {
        loop {
            match self.transport.accept() {
                Ok(Some((id, addr))) => {
                    self.matrix.add_session(Session::new(id, addr, now));
                    info!(conn = %id, %addr, "Connection accepted");
                }
                Ok(None) => {
                    self.accept_retry = false;
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "Accept failed, retrying next turn");
                    self.accept_retry = true;
                    break;
                }
            }
        }
    }

    /// Drain the socket chunk by chunk, dispatching lines as they complete.
    fn on_readable(&mut self, id: ConnId, now: Instant) {
        loop {
            match self.transport.read(id, &mut self.read_buf) {
                ReadOutcome::Data(n) => {
                    let Some(session) = self.matrix.session_mut(id) else {
                        return;
                    };
                    session.input.extend_from_slice(&self.read_buf[..n]);
                    if !self.process_input(id, now) {
                        return;
                    }
                }
                ReadOutcome::WouldBlock => return,
                ReadOutcome::Closed => {
                    self.disconnect(id, "Connection closed", false);
                    return;
                }
                ReadOutcome::Failed(e) => {
                    warn!(conn = %id, error = %e, "Read failed");
                    self.disconnect(id, "Read error", false);
                    return;
                }
            }
        }
    }

    /// Dispatch every complete buffered line. Returns whether the session
    /// survived.
    fn process_input(&mut self, id: ConnId, now: Instant) -> bool {
        loop {
            let Some(session) = self.matrix.session_mut(id) else {
                return false;
            };
            let Session { codec, input, .. } = session;
            let line = match codec.decode(input) {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    warn!(conn = %id, error = %e, "Undecodable input");
                    self.disconnect(id, "Read error", false);
                    return false;
                }
            };
            self.dispatch_line(id, &line, now);
        }

        let pending = self.matrix.session(id).map_or(0, |s| s.input.len());
        if pending > self.max_input {
            warn!(conn = %id, pending, "Input buffer overflow");
            self.disconnect(id, "Input buffer overflow", true);
            return false;
        }
        true
    }

    fn dispatch_line(&mut self, id: ConnId, line: &str, now: Instant) {
        let msg = match MessageRef::parse(line) {
            Ok(msg) => msg,
            Err(e) => {
                debug!(conn = %id, error = %e, "Dropping unparsable line");
                return;
            }
        };

        let result = {
            let _span = spans::command(msg.command_name(), &id.to_string()).entered();
            let _timer = CommandTimer::new(msg.command_name());
            let mut ctx = Context::new(id, &mut self.matrix, now);
            self.registry.dispatch(&mut ctx, &msg)
        };

        match result {
            Ok(()) => {
                if let Some(session) = self.matrix.session_mut(id)
                    && session.is_registered()
                {
                    session.touch(now);
                }
            }
            Err(HandlerError::Quit(reason)) => {
                let reason = reason.unwrap_or_else(|| DEFAULT_QUIT_REASON.to_string());
                self.disconnect(id, &reason, true);
            }
            Err(e) => warn!(conn = %id, error = %e, "Unhandled command error"),
        }
    }

    /// Write queued output until it is gone or the socket pushes back.
    fn flush(&mut self, id: ConnId) -> io::Result<()> {
        loop {
            let Some(session) = self.matrix.session_mut(id) else {
                return Ok(());
            };
            if session.output.is_empty() {
                if self.write_interest.remove(&id) {
                    self.transport.set_write_interest(id, false)?;
                }
                return Ok(());
            }
            match self.transport.write(id, &session.output) {
                WriteOutcome::Written(n) => session.output.advance(n),
                WriteOutcome::WouldBlock => {
                    if self.write_interest.insert(id) {
                        self.transport.set_write_interest(id, true)?;
                    }
                    return Ok(());
                }
                WriteOutcome::Failed(e) => return Err(e),
            }
        }
    }

    fn flush_or_drop(&mut self, id: ConnId) {
        if let Err(e) = self.flush(id) {
            warn!(conn = %id, error = %e, "Write failed");
            self.disconnect(id, "Write error", false);
        }
    }

    /// Flush pending output and apply evictions until neither remains.
    fn settle(&mut self) {
        loop {
            let intents = self.matrix.take_write_intents();
            let evictions = self.matrix.take_evictions();
            if intents.is_empty() && evictions.is_empty() {
                return;
            }
            for id in intents {
                self.flush_or_drop(id);
            }
            for (id, reason) in evictions {
                self.disconnect(id, &reason, true);
            }
        }
    }

    fn send_keepalive(&mut self, id: ConnId, now: Instant) {
        let ping = Message::from(Command::PING(self.matrix.server_info.name.clone()));
        self.matrix.send_to(id, &ping);
        if let Some(session) = self.matrix.session_mut(id) {
            session.ping_pending = true;
            session.ping_sent_at = Some(now);
        }
        debug!(conn = %id, "Keepalive PING sent");
    }

    /// Queue an `ERROR` line and push it out on a best-effort basis.
    fn send_farewell(&mut self, id: ConnId, reason: &str) {
        let Some(session) = self.matrix.session(id) else {
            return;
        };
        let text = format!("Closing Link: {} ({reason})", session.host);
        self.matrix.send_to(id, &Message::from(Command::ERROR(text)));
        if let Err(e) = self.flush(id) {
            debug!(conn = %id, error = %e, "Farewell not delivered");
        }
    }

    /// Tear down a session: optional farewell, QUIT to everyone sharing a
    /// channel with it, registry removal and handle release.
    fn disconnect(&mut self, id: ConnId, reason: &str, farewell: bool) {
        let Some(session) = self.matrix.session(id) else {
            return;
        };
        let prefix = session.prefix();

        if farewell {
            self.send_farewell(id, reason);
        }

        let quit = Message::from(Command::QUIT(reason.to_string())).with_prefix(prefix);
        for peer in self.matrix.peers_of(id) {
            self.matrix.send_to(peer, &quit);
        }

        self.matrix.remove_session(id);
        self.write_interest.remove(&id);
        self.transport.close(id);
        info!(conn = %id, reason = %reason, "Connection closed");
    }
}
