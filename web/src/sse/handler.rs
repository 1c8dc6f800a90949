use crate::extractors::streaming_transport::StreamingTransport;
use crate::AppState;
use async_stream::stream;
use axum::extract::State;
use axum::http::header;
use axum::response::sse::{KeepAlive, Sse};
use axum::response::IntoResponse;
use log::*;
use sse::sink::ChannelSink;
use sse::stream::StreamEndpoint;
use std::sync::Arc;
use tokio::sync::mpsc;

/// SSE handler that opens a long-lived event stream. Every broadcast is
/// pushed down every open stream until the client goes away.
pub(crate) async fn sse_handler(
    transport: StreamingTransport,
    State(app_state): State<AppState>,
) -> impl IntoResponse {
    debug!("Establishing SSE connection over {:?}", transport.version);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let closed = app_state.sse_manager.connection_closed_signal();

    StreamEndpoint::new(Arc::clone(&app_state.sse_manager))
        .open(Arc::new(ChannelSink::new(tx)), closed.clone());

    // Hyper drops the body when the client disconnects or the connection
    // fails; the guard turns that drop into the endpoint's closed signal.
    let guard = closed.clone().drop_guard();

    let stream = stream! {
        let _guard = guard;
        loop {
            let next = tokio::select! {
                _ = closed.cancelled() => None,
                event = rx.recv() => event,
            };
            match next {
                Some(event) => yield event,
                None => break,
            }
        }
    };

    let mut sse = Sse::new(stream);
    if let Some(interval) = app_state.config.sse_keep_alive() {
        sse = sse.keep_alive(KeepAlive::new().interval(interval));
    }

    ([(header::CONNECTION, "keep-alive")], sse)
}
