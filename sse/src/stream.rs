use crate::manager::Manager;
use crate::sink::Sink;
use log::*;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Drives the lifecycle of one streaming connection:
/// accepted -> registered -> waiting for disconnect -> unregistered.
///
/// The endpoint never writes to its sink; only broadcasts do.
#[derive(Clone)]
pub struct StreamEndpoint {
    manager: Arc<Manager>,
}

impl StreamEndpoint {
    pub fn new(manager: Arc<Manager>) -> Self {
        Self { manager }
    }

    /// Registers `sink` and spawns the task that waits for `closed`.
    ///
    /// Registration happens before this returns, so a broadcast issued right
    /// after is guaranteed to include the new sink. The spawned task holds no
    /// lock while it waits and unregisters exactly once, whether the
    /// connection ended cleanly, abnormally, or because the server is
    /// shutting down.
    pub fn open(&self, sink: Arc<dyn Sink>, closed: CancellationToken) -> JoinHandle<()> {
        let connection_id = self.manager.register_connection(sink);
        let manager = Arc::clone(&self.manager);

        tokio::spawn(async move {
            closed.cancelled().await;

            debug!("SSE connection {connection_id} closed, cleaning up");
            manager.unregister_connection(&connection_id);
        })
    }
}
