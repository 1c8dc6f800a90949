//! Server-Sent Events (SSE) infrastructure for broadcast push notifications.
//!
//! This crate tracks every open event-stream connection and fans a message
//! out to all of them whenever an update is triggered.
//!
//! # Architecture
//!
//! - **Sinks**: Each connection is represented by a [`sink::Sink`], a
//!   flushable writer. The registry never sees the transport itself.
//! - **Reader/writer registry**: Register/unregister take the write lock,
//!   broadcasts take the read lock only to snapshot the current sinks.
//!   No lock is held while writing to a client.
//! - **Best effort**: A write to a client that disconnected mid-broadcast is
//!   dropped silently. The connection's own lifecycle removes it.
//! - **Ephemeral messages**: Nothing is stored. Clients that connect after a
//!   broadcast never see it.
//!
//! # Message Flow
//!
//! 1. Client opens `/events`
//! 2. The web layer wraps the response body in a `ChannelSink` and calls
//!    [`stream::StreamEndpoint::open`], which registers it and waits for the
//!    connection's closed signal
//! 3. A trigger builds a [`message::Message`] and calls [`Manager::broadcast`]
//! 4. Each registered sink is written and flushed; failures are skipped
//! 5. When the body is dropped the closed signal fires and the connection is
//!    unregistered
//!
//! # Modules
//!
//! - `connection`: ConnectionRegistry and the ConnectionId handle
//! - `manager`: Logging facade over the registry plus the shutdown signal
//! - `message`: The immutable broadcast payload and its wire framing
//! - `sink`: The flushable writer capability and its channel-backed implementation
//! - `stream`: Per-connection register/wait/unregister lifecycle

pub mod connection;
pub mod manager;
pub mod message;
pub mod sink;
pub mod stream;

#[cfg(test)]
pub(crate) mod testing;

pub use manager::Manager;
