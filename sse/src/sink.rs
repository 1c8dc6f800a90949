use crate::message::Message;
use axum::response::sse::Event;
use std::convert::Infallible;
use std::error::Error as StdError;
use std::fmt;
use tokio::sync::mpsc::UnboundedSender;

/// Errors a [`Sink`] can report while a broadcast writes to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The peer behind this sink has gone away. Expected whenever a client
    /// disconnects between a broadcast's snapshot and its write.
    Closed,
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Closed => write!(f, "sink closed: the client has disconnected"),
        }
    }
}

impl StdError for SinkError {}

/// A flushable writer bound to exactly one client connection.
///
/// The registry only ever holds sinks, so any transport that can provide
/// write + flush semantics can receive broadcasts.
pub trait Sink: Send + Sync {
    /// Writes one message to the underlying transport.
    fn write(&self, message: &Message) -> Result<(), SinkError>;

    /// Forces previously written data out to the client immediately.
    fn flush(&self) -> Result<(), SinkError>;
}

/// Sink backed by the sending half of a channel whose receiving half is
/// drained by a streaming HTTP response body.
///
/// Every write becomes its own body frame, and the body is polled by the
/// server as frames arrive, so there is no buffering between `write` and the
/// wire. `flush` therefore only has to confirm the body is still alive.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: UnboundedSender<Result<Event, Infallible>>,
}

impl ChannelSink {
    pub fn new(sender: UnboundedSender<Result<Event, Infallible>>) -> Self {
        Self { sender }
    }
}

impl Sink for ChannelSink {
    fn write(&self, message: &Message) -> Result<(), SinkError> {
        self.sender
            .send(Ok(message.to_event()))
            .map_err(|_| SinkError::Closed)
    }

    fn flush(&self) -> Result<(), SinkError> {
        if self.sender.is_closed() {
            Err(SinkError::Closed)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::sse::Sse;
    use axum::response::IntoResponse;
    use futures_util::stream;
    use http_body_util::BodyExt;
    use tokio::sync::mpsc;

    /// Renders everything written to a channel sink the way the HTTP layer
    /// does and returns the bytes the client would receive.
    async fn wire_bytes(messages: &[Message]) -> String {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = ChannelSink::new(tx);
        for message in messages {
            sink.write(message).unwrap();
        }
        drop(sink);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }

        let body = Sse::new(stream::iter(events))
            .into_response()
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_wire_bytes_match_message_frames() {
        let messages = [
            Message::new("Update triggered at 2024-03-09T14:05:07Z"),
            Message::new("first\nsecond"),
            Message::new("windows\r\nline\rendings"),
        ];

        let expected: String = messages.iter().map(Message::frame).collect();
        assert_eq!(wire_bytes(&messages).await, expected);
    }

    #[tokio::test]
    async fn test_channel_sink_delivers_write_to_receiver() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = ChannelSink::new(tx);

        sink.write(&Message::new("hello")).unwrap();
        sink.flush().unwrap();

        assert!(rx.recv().await.is_some(), "receiver should get the event");
    }

    #[tokio::test]
    async fn test_channel_sink_reports_closed_after_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = ChannelSink::new(tx);
        drop(rx);

        assert_eq!(sink.write(&Message::new("hello")), Err(SinkError::Closed));
        assert_eq!(sink.flush(), Err(SinkError::Closed));
    }

    #[test]
    fn test_sink_error_display() {
        assert_eq!(
            SinkError::Closed.to_string(),
            "sink closed: the client has disconnected"
        );
    }
}
