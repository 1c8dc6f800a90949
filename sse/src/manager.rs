use crate::connection::{ConnectionId, ConnectionRegistry};
use crate::message::Message;
use crate::sink::Sink;
use log::*;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct Manager {
    registry: Arc<ConnectionRegistry>,
    shutdown: CancellationToken,
}

impl Manager {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(ConnectionRegistry::new()),
            shutdown: CancellationToken::new(),
        }
    }

    /// Register a new connection and return its unique ID
    pub fn register_connection(&self, sink: Arc<dyn Sink>) -> ConnectionId {
        let connection_id = self.registry.register(sink);
        info!("Registered new SSE connection {connection_id}");
        connection_id
    }

    /// Unregister a connection by ID
    pub fn unregister_connection(&self, connection_id: &ConnectionId) {
        if self.registry.unregister(connection_id) {
            info!("Unregistered SSE connection {connection_id}");
        } else {
            debug!("SSE connection {connection_id} was already unregistered");
        }
    }

    /// Fan a message out to every connection registered right now.
    pub fn broadcast(&self, message: Message) {
        let delivered = self.registry.broadcast(&message);
        debug!("Broadcast \"{message}\" delivered to {delivered} connection(s)");
    }

    pub fn connection_count(&self) -> usize {
        self.registry.len()
    }

    /// A signal that resolves when a connection should be considered closed.
    /// The transport cancels it when the peer disconnects; server shutdown
    /// cancels every outstanding signal at once.
    pub fn connection_closed_signal(&self) -> CancellationToken {
        self.shutdown.child_token()
    }

    /// Close every open connection.
    pub fn shutdown(&self) {
        info!(
            "Closing {} open SSE connection(s)",
            self.registry.len()
        );
        self.shutdown.cancel();
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;

    #[test]
    fn test_broadcast_after_unregister_skips_connection() {
        let manager = Manager::new();
        let a = RecordingSink::new();
        let b = RecordingSink::new();
        let a_id = manager.register_connection(a.clone());
        manager.register_connection(b.clone());

        manager.unregister_connection(&a_id);
        manager.broadcast(Message::new("X"));

        assert!(a.frames().is_empty());
        assert_eq!(b.frames(), vec!["data: X\n\n".to_string()]);
        assert_eq!(manager.connection_count(), 1);
    }

    #[test]
    fn test_shutdown_cancels_outstanding_signals() {
        let manager = Manager::new();
        let first = manager.connection_closed_signal();
        let second = manager.connection_closed_signal();

        manager.shutdown();

        assert!(first.is_cancelled());
        assert!(second.is_cancelled());
    }

    #[test]
    fn test_cancelling_one_signal_leaves_others_open() {
        let manager = Manager::new();
        let first = manager.connection_closed_signal();
        let second = manager.connection_closed_signal();

        first.cancel();

        assert!(!second.is_cancelled());
        assert!(!manager.connection_closed_signal().is_cancelled());
    }
}
