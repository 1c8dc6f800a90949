use anyhow::Result;
use clap::Parser;
use colored::*;
use std::time::Duration;

use testing_tools::api_client::ApiClient;
use testing_tools::output::print_test_summary;
use testing_tools::scenarios;
use testing_tools::sse_client::Connection;

#[derive(Parser)]
#[command(name = "sse-test-client")]
#[command(about = "SSE Integration Testing Tool")]
struct Cli {
    /// Base URL of the server (e.g., http://localhost:8080)
    #[arg(long, default_value = "http://localhost:8080")]
    base_url: String,

    /// Number of event stream clients to open
    #[arg(long, default_value_t = 3)]
    clients: usize,

    /// Test scenario to run
    #[arg(long, value_enum)]
    scenario: ScenarioChoice,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(clap::ValueEnum, Clone)]
enum ScenarioChoice {
    /// Open event streams and confirm they stay idle
    ConnectionTest,
    /// Trigger one update and confirm every stream receives it once
    BroadcastTest,
    /// Close one stream and confirm the others still receive updates
    DisconnectTest,
    /// Run every scenario
    All,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    }

    println!("{}", "=== SETUP PHASE ===".bright_white().bold());

    let api_client = ApiClient::new(reqwest::Client::new(), cli.base_url.clone());

    println!("\n{} Establishing SSE connections...", "→".blue());
    let mut connections = Vec::with_capacity(cli.clients);
    for n in 1..=cli.clients {
        let connection = Connection::establish(&cli.base_url, format!("Client {}", n)).await?;
        connections.push(connection);
    }
    // Streams connect in the background; give them a moment to register.
    tokio::time::sleep(Duration::from_millis(500)).await;
    println!(
        "{} {} SSE connection(s) established",
        "✓".green(),
        connections.len()
    );

    println!("\n{}", "=== TEST PHASE ===".bright_white().bold());

    let mut results = Vec::new();

    match cli.scenario {
        ScenarioChoice::ConnectionTest => {
            results.push(scenarios::test_connection(&api_client, &mut connections).await?);
        }
        ScenarioChoice::BroadcastTest => {
            results.push(scenarios::test_broadcast(&api_client, &mut connections).await?);
        }
        ScenarioChoice::DisconnectTest => {
            results.push(
                scenarios::test_disconnect(&api_client, &cli.base_url, &mut connections).await?,
            );
        }
        ScenarioChoice::All => {
            results.push(scenarios::test_connection(&api_client, &mut connections).await?);
            results.push(scenarios::test_broadcast(&api_client, &mut connections).await?);
            results.push(
                scenarios::test_disconnect(&api_client, &cli.base_url, &mut connections).await?,
            );
        }
    }

    println!("\n{}", "=== RESULTS ===".bright_white().bold());
    print_test_summary(&results);

    let all_passed = results.iter().all(|r| r.passed);

    if all_passed {
        println!("\n{}", "All tests passed! ✓".bright_green().bold());
    } else {
        println!("\n{}", "Some tests failed! ✗".bright_red().bold());
    }

    std::process::exit(if all_passed { 0 } else { 1 });
}
