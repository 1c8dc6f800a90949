use log::*;
use service::{config::Config, logging::Logger, AppState};
use sse::Manager;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to start logger: {e}");
        std::process::exit(1);
    }

    info!(
        "Starting fanout_server {} on {}",
        env!("CARGO_PKG_VERSION"),
        config.listen_address()
    );

    let sse_manager = Arc::new(Manager::new());
    let app_state = AppState::new(config, &sse_manager);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server failed: {e}");
        std::process::exit(1);
    }

    info!("Server stopped");
}
