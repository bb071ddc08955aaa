//! The Matrix - central server state.
//!
//! The Matrix is the sole owner of every [`Session`] and [`Channel`]. Other
//! components hold [`ConnId`]s or channel names and resolve them here on each
//! access; nothing else creates or destroys these objects.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use bytes::BytesMut;
use chrono::{DateTime, Utc};
use ircserv_proto::Message;
use tokio_util::codec::Encoder;
use tracing::{debug, warn};

use super::{Channel, ConnId, Session};

/// Server identity advertised to clients.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    pub created: DateTime<Utc>,
    /// Shared connection password.
    pub password: String,
}

/// Central server state.
#[derive(Debug)]
pub struct Matrix {
    pub server_info: ServerInfo,
    sessions: HashMap<ConnId, Session>,
    /// Exact-match nickname index.
    nicks: HashMap<String, ConnId>,
    channels: BTreeMap<String, Channel>,
    /// Sessions with freshly queued output.
    write_intents: BTreeSet<ConnId>,
    /// Sessions the multiplexer must drop after the current step.
    evictions: Vec<(ConnId, String)>,
    max_output: usize,
}

impl Matrix {
    pub fn new(server_info: ServerInfo, max_output: usize) -> Self {
        Self {
            server_info,
            sessions: HashMap::new(),
            nicks: HashMap::new(),
            channels: BTreeMap::new(),
            write_intents: BTreeSet::new(),
            evictions: Vec::new(),
            max_output,
        }
    }

    // ------------------------------------------------------------------
    // Sessions
    // ------------------------------------------------------------------

    pub fn add_session(&mut self, session: Session) {
        self.sessions.insert(session.id, session);
    }

    pub fn session(&self, id: ConnId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn session_mut(&mut self, id: ConnId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    pub fn session_ids(&self) -> Vec<ConnId> {
        let mut ids: Vec<_> = self.sessions.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn find_nick(&self, nick: &str) -> Option<ConnId> {
        self.nicks.get(nick).copied()
    }

    /// Give `id` a nickname, replacing its previous one in the index.
    ///
    /// Callers check availability first; a taken nickname is left untouched
    /// and `false` is returned.
    pub fn set_nick(&mut self, id: ConnId, nick: &str) -> bool {
        if let Some(owner) = self.find_nick(nick) {
            return owner == id;
        }
        let Some(session) = self.sessions.get_mut(&id) else {
            return false;
        };
        if let Some(old) = session.nick.replace(nick.to_string()) {
            self.nicks.remove(&old);
        }
        self.nicks.insert(nick.to_string(), id);
        true
    }

    /// Remove a session, unlinking it from every channel first.
    ///
    /// Channels left empty are destroyed. The caller is responsible for any
    /// QUIT broadcast, which must happen before this call while the
    /// memberships still exist.
    pub fn remove_session(&mut self, id: ConnId) -> Option<Session> {
        let session = self.sessions.remove(&id)?;
        for name in self.channels_of(id) {
            self.part_channel(id, &name);
        }
        if let Some(ref nick) = session.nick {
            if self.nicks.get(nick) == Some(&id) {
                self.nicks.remove(nick);
            }
        }
        self.write_intents.remove(&id);
        Some(session)
    }

    // ------------------------------------------------------------------
    // Channels
    // ------------------------------------------------------------------

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    pub fn channel_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.get_mut(name)
    }

    /// Get a channel, creating it empty if absent.
    ///
    /// A created channel must receive a member before control returns to
    /// the event loop.
    pub fn channel_or_create(&mut self, name: &str) -> &mut Channel {
        self.channels.entry(name.to_string()).or_insert_with(|| {
            debug!(channel = %name, "Channel created");
            Channel::new(name)
        })
    }

    /// Drop `id` from a channel, destroying the channel if it empties.
    pub fn part_channel(&mut self, id: ConnId, name: &str) -> bool {
        let Some(channel) = self.channels.get_mut(name) else {
            return false;
        };
        let removed = channel.remove_member(id);
        if channel.is_empty() {
            self.channels.remove(name);
            debug!(channel = %name, "Channel destroyed");
        }
        removed
    }

    /// Names of the channels `id` belongs to.
    pub fn channels_of(&self, id: ConnId) -> Vec<String> {
        self.channels
            .values()
            .filter(|c| c.is_member(id))
            .map(|c| c.name.clone())
            .collect()
    }

    /// Every other session sharing at least one channel with `id`, once each.
    pub fn peers_of(&self, id: ConnId) -> Vec<ConnId> {
        let peers: BTreeSet<ConnId> = self
            .channels
            .values()
            .filter(|c| c.is_member(id))
            .flat_map(|c| c.members().iter().copied())
            .filter(|m| *m != id)
            .collect();
        peers.into_iter().collect()
    }

    /// The NAMES list of a channel: nicknames in join order, operators
    /// prefixed with `@`.
    pub fn names(&self, channel: &Channel) -> Vec<String> {
        channel
            .members()
            .iter()
            .filter_map(|id| {
                let nick = self.sessions.get(id)?.nick.as_deref()?;
                Some(if channel.is_operator(*id) {
                    format!("@{nick}")
                } else {
                    nick.to_string()
                })
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Queue a message for one session.
    ///
    /// Output that would push the session past its send queue is dropped and
    /// the session is marked for eviction.
    pub fn send_to(&mut self, id: ConnId, msg: &Message) {
        let Some(session) = self.sessions.get_mut(&id) else {
            return;
        };

        let mut line = BytesMut::new();
        if let Err(e) = session.codec.encode(msg, &mut line) {
            warn!(conn = %id, error = %e, "Dropping unencodable message");
            return;
        }

        if session.output.len() + line.len() > self.max_output {
            if !self.evictions.iter().any(|(e, _)| *e == id) {
                warn!(conn = %id, queued = session.output.len(), "SendQ exceeded");
                self.evictions.push((id, "SendQ exceeded".to_string()));
            }
            return;
        }

        session.output.extend_from_slice(&line);
        self.write_intents.insert(id);
    }

    /// Queue a message for every member of a channel, optionally skipping one.
    pub fn broadcast(&mut self, channel: &str, msg: &Message, exclude: Option<ConnId>) {
        let Some(chan) = self.channels.get(channel) else {
            return;
        };
        let members: Vec<ConnId> = chan.members().to_vec();
        for member in members {
            if Some(member) != exclude {
                self.send_to(member, msg);
            }
        }
    }

    pub fn take_write_intents(&mut self) -> Vec<ConnId> {
        std::mem::take(&mut self.write_intents).into_iter().collect()
    }

    pub fn take_evictions(&mut self) -> Vec<(ConnId, String)> {
        std::mem::take(&mut self.evictions)
    }

    /// Drop every session and channel.
    pub fn clear(&mut self) {
        self.sessions.clear();
        self.nicks.clear();
        self.channels.clear();
        self.write_intents.clear();
        self.evictions.clear();
    }
}
