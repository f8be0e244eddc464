//! Attached client sessions.
//!
//! The bridge keeps exactly one piece of per-connection state: the set of
//! entities currently visible to that client. Everything else is global.
//! Sessions are owned by the bridge and therefore only ever touched from
//! the simulation context.

use std::fmt;

use hashbrown::{HashMap, HashSet};
use webvox_proto::ServerCommand;

use crate::host::EntityId;

/// Opaque handle identifying one attached client connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Outbound half of a client connection.
///
/// Sends must not block the simulation context and must tolerate a closed
/// peer; delivery is best-effort.
pub trait LineSink: Send {
    /// Queue one wire line (without terminator) for delivery.
    fn send_line(&self, line: &str);
}

/// Per-connection bridge state.
pub struct Session {
    sink: Box<dyn LineSink>,
    /// Entities this client has been sent an add for, and no delete yet.
    pub visible: HashSet<EntityId>,
}

impl Session {
    /// Send one command to this client.
    pub fn send(&self, command: &ServerCommand) {
        self.sink.send_line(&command.encode());
    }

    fn send_raw(&self, line: &str) {
        self.sink.send_line(line);
    }
}

/// Which clients an outgoing command is for.
#[derive(Clone, Copy, Debug)]
pub enum Audience {
    /// Every attached client.
    All,
    /// A single client.
    One(ClientId),
    /// Every client except the originator of the triggering command.
    Others(ClientId),
}

/// All attached sessions, keyed by connection.
#[derive(Default)]
pub struct Sessions {
    map: HashMap<ClientId, Session>,
}

impl Sessions {
    /// Register a newly attached client with an empty visibility set.
    pub fn attach(&mut self, id: ClientId, sink: Box<dyn LineSink>) {
        self.map.insert(
            id,
            Session {
                sink,
                visible: HashSet::new(),
            },
        );
    }

    /// Drop a client's session and visibility set.
    pub fn detach(&mut self, id: ClientId) -> bool {
        self.map.remove(&id).is_some()
    }

    /// Number of attached clients.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True when no client is attached.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Access one session.
    pub fn get_mut(&mut self, id: ClientId) -> Option<&mut Session> {
        self.map.get_mut(&id)
    }

    /// Iterate all sessions mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ClientId, &mut Session)> {
        self.map.iter_mut().map(|(&id, session)| (id, session))
    }

    /// Send one command to an audience. The line is encoded once; sends to
    /// closed peers are silently dropped by the sink.
    pub fn send_to(&self, audience: Audience, command: &ServerCommand) {
        let line = command.encode();
        match audience {
            Audience::All => {
                for session in self.map.values() {
                    session.send_raw(&line);
                }
            }
            Audience::One(id) => {
                if let Some(session) = self.map.get(&id) {
                    session.send_raw(&line);
                }
            }
            Audience::Others(except) => {
                for (&id, session) in &self.map {
                    if id != except {
                        session.send_raw(&line);
                    }
                }
            }
        }
    }
}
