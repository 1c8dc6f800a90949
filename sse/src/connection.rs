use crate::message::Message;
use crate::sink::Sink;
use log::*;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Unique identifier for a connection (server-generated)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct Entry {
    id: ConnectionId,
    sink: Arc<dyn Sink>,
}

/// The authoritative set of sinks that receive the next broadcast.
///
/// Entries are kept in registration order. Register and unregister take the
/// write lock; broadcast takes the read lock only long enough to copy the
/// current entries, then writes to each sink with no lock held.
pub struct ConnectionRegistry {
    connections: RwLock<Vec<Entry>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(Vec::new()),
        }
    }

    /// Register a new sink. It receives every broadcast whose snapshot is
    /// taken after this returns.
    pub fn register(&self, sink: Arc<dyn Sink>) -> ConnectionId {
        let id = ConnectionId::new();

        self.connections.write().push(Entry {
            id: id.clone(),
            sink,
        });

        id
    }

    /// Unregister a connection. Returns `false` when the id was already
    /// absent, in which case the registry is left untouched.
    pub fn unregister(&self, connection_id: &ConnectionId) -> bool {
        let mut connections = self.connections.write();

        match connections.iter().position(|entry| &entry.id == connection_id) {
            Some(index) => {
                connections.remove(index);
                true
            }
            None => false,
        }
    }

    /// Write and flush `message` to every sink registered when the call
    /// starts. A failing sink is skipped; its own connection lifecycle is
    /// responsible for removing it. Returns how many sinks accepted the
    /// message.
    pub fn broadcast(&self, message: &Message) -> usize {
        let snapshot: Vec<(ConnectionId, Arc<dyn Sink>)> = self
            .connections
            .read()
            .iter()
            .map(|entry| (entry.id.clone(), Arc::clone(&entry.sink)))
            .collect();

        let mut delivered = 0;
        for (id, sink) in snapshot {
            match sink.write(message).and_then(|()| sink.flush()) {
                Ok(()) => delivered += 1,
                Err(e) => trace!("Skipping broadcast to connection {id}: {e}"),
            }
        }

        delivered
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.connections
            .read()
            .iter()
            .any(|entry| &entry.id == connection_id)
    }

    pub fn len(&self) -> usize {
        self.connections.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.read().is_empty()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
