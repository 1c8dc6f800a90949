//! HTTP surface of the fan-out server: the event stream, the update trigger,
//! a health check, and the static page that ties them together in a browser.

use log::*;
use tokio::net::TcpListener;

pub use service::AppState;

mod controller;
mod error;
mod extractors;
pub mod router;
mod sse;

/// Binds the configured address and serves until Ctrl-C.
///
/// On shutdown every open event stream is closed first; otherwise the
/// graceful shutdown would wait forever on connections that never end.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let listen_address = app_state.config.listen_address();
    let listener = TcpListener::bind(&listen_address).await?;
    info!("Server started on {listen_address}");

    let manager = app_state.sse_manager.clone();
    let app = router::define_routes(app_state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {e}");
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received");
            manager.shutdown();
        })
        .await
}
