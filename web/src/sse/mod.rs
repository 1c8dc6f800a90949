//! SSE HTTP handler for the web layer.
//!
//! This module contains only the Axum handler for the event stream endpoint.
//! The connection registry, sinks, and the per-connection lifecycle live in
//! the `sse` crate.

pub mod handler;
