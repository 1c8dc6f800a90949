use anyhow::Result;
use eventsource_client::{self as es, Client};
use futures_util::stream::StreamExt;
use log::*;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: String,
    pub data: String,
    pub timestamp: Instant,
}

pub struct Connection {
    pub label: String,
    event_rx: mpsc::UnboundedReceiver<Event>,
    handle: tokio::task::JoinHandle<()>,
}

impl Connection {
    pub async fn establish(base_url: &str, label: String) -> Result<Self> {
        let url = format!("{}/events", base_url);
        let (tx, rx) = mpsc::unbounded_channel();

        let client = es::ClientBuilder::for_url(&url)?.build();

        let stream_label = label.clone();
        let handle = tokio::spawn(async move {
            let mut stream = client.stream();

            loop {
                match stream.next().await {
                    Some(Ok(es::SSE::Event(event))) => {
                        let sse_event = Event {
                            event_type: event.event_type,
                            data: event.data,
                            timestamp: Instant::now(),
                        };

                        if tx.send(sse_event).is_err() {
                            debug!("SSE receiver dropped for {}", stream_label);
                            break;
                        }
                    }
                    Some(Ok(es::SSE::Comment(_))) => {
                        // Ignore comments (keep-alive)
                    }
                    Some(Err(e)) => {
                        warn!("SSE error for {}: {}", stream_label, e);
                    }
                    None => {
                        debug!("SSE stream ended for {}", stream_label);
                        break;
                    }
                }
            }
        });

        Ok(Self {
            label,
            event_rx: rx,
            handle,
        })
    }

    /// Waits for the next event whose data starts with `prefix`.
    pub async fn wait_for_event(&mut self, prefix: &str, timeout: Duration) -> Result<Event> {
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                anyhow::bail!("Timeout waiting for event starting with {:?}", prefix);
            }

            match tokio::time::timeout(remaining, self.event_rx.recv()).await {
                Ok(Some(event)) if event.data.starts_with(prefix) => {
                    return Ok(event);
                }
                Ok(Some(_)) => {
                    // Unrelated event, keep waiting
                    continue;
                }
                Ok(None) => {
                    anyhow::bail!("SSE connection closed");
                }
                Err(_) => {
                    anyhow::bail!("Timeout waiting for event starting with {:?}", prefix);
                }
            }
        }
    }

    /// Expects no event at all within `window`.
    pub async fn expect_silence(&mut self, window: Duration) -> Result<()> {
        match tokio::time::timeout(window, self.event_rx.recv()).await {
            Ok(Some(event)) => anyhow::bail!("Unexpected event: {:?}", event.data),
            Ok(None) | Err(_) => Ok(()),
        }
    }

    /// Drops the underlying HTTP stream, as a browser tab closing would.
    pub fn close(self) {
        self.handle.abort();
    }
}
