use anyhow::Result;
use colored::*;
use std::time::{Duration, Instant};

use crate::api_client::{ApiClient, TRIGGER_ACK};
use crate::output::{print_event, TestResult};
use crate::sse_client::Connection;

const EVENT_PREFIX: &str = "Update triggered at ";
const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens streams and confirms nothing is pushed until a trigger fires.
pub async fn test_connection(
    api_client: &ApiClient,
    connections: &mut [Connection],
) -> Result<TestResult> {
    let start = Instant::now();

    println!("\n{}", "=== TEST: Connection ===".bright_cyan().bold());

    let health = api_client.health().await?;
    println!("{} Server health: {}", "✓".green(), health);

    for connection in connections.iter_mut() {
        if let Err(e) = connection.expect_silence(Duration::from_millis(500)).await {
            println!("{} {} received data before any trigger", "✗".red(), connection.label);
            return Ok(TestResult::fail(
                "connection",
                format!("{}: {}", connection.label, e),
                start.elapsed(),
            ));
        }
        println!("{} {} connected and idle", "✓".green(), connection.label);
    }

    Ok(TestResult::pass("connection", start.elapsed()))
}

/// One trigger must reach every open stream exactly once.
pub async fn test_broadcast(
    api_client: &ApiClient,
    connections: &mut [Connection],
) -> Result<TestResult> {
    let start = Instant::now();

    println!("\n{}", "=== TEST: Broadcast ===".bright_cyan().bold());

    println!("{} Triggering update...", "→".blue());
    let sent = Instant::now();
    let ack = api_client.trigger_update().await?;
    if ack != TRIGGER_ACK {
        return Ok(TestResult::fail(
            "broadcast",
            format!("Unexpected trigger acknowledgement: {:?}", ack),
            start.elapsed(),
        ));
    }

    for connection in connections.iter_mut() {
        match connection.wait_for_event(EVENT_PREFIX, EVENT_TIMEOUT).await {
            Ok(event) => {
                print_event(&connection.label, &event);
                println!(
                    "   delivered after {:?}",
                    event.timestamp.saturating_duration_since(sent)
                );
            }
            Err(e) => {
                println!("{} {} missed the broadcast: {}", "✗".red(), connection.label, e);
                return Ok(TestResult::fail(
                    "broadcast",
                    format!("{}: {}", connection.label, e),
                    start.elapsed(),
                ));
            }
        }
    }

    for connection in connections.iter_mut() {
        if let Err(e) = connection.expect_silence(Duration::from_millis(500)).await {
            return Ok(TestResult::fail(
                "broadcast",
                format!("{} received a duplicate: {}", connection.label, e),
                start.elapsed(),
            ));
        }
    }

    println!("{} Every connection received the update once", "✓".green());
    Ok(TestResult::pass("broadcast", start.elapsed()))
}

/// A client disconnecting must not stop delivery to the remaining clients.
pub async fn test_disconnect(
    api_client: &ApiClient,
    base_url: &str,
    remaining: &mut [Connection],
) -> Result<TestResult> {
    let start = Instant::now();

    println!("\n{}", "=== TEST: Disconnect ===".bright_cyan().bold());

    let leaving = Connection::establish(base_url, "Leaving client".to_string()).await?;
    tokio::time::sleep(Duration::from_millis(500)).await;

    println!("{} Closing {}...", "→".blue(), leaving.label);
    leaving.close();
    tokio::time::sleep(Duration::from_millis(200)).await;

    println!("{} Triggering update...", "→".blue());
    let ack = api_client.trigger_update().await?;
    if ack != TRIGGER_ACK {
        return Ok(TestResult::fail(
            "disconnect",
            format!("Unexpected trigger acknowledgement: {:?}", ack),
            start.elapsed(),
        ));
    }

    for connection in remaining.iter_mut() {
        if let Err(e) = connection.wait_for_event(EVENT_PREFIX, EVENT_TIMEOUT).await {
            println!("{} {} missed the broadcast: {}", "✗".red(), connection.label, e);
            return Ok(TestResult::fail(
                "disconnect",
                format!("{}: {}", connection.label, e),
                start.elapsed(),
            ));
        }
        println!("{} {} still receives updates", "✓".green(), connection.label);
    }

    Ok(TestResult::pass("disconnect", start.elapsed()))
}
