use crate::{
    controller::{health_check_controller, trigger_controller},
    sse::handler::sse_handler,
    AppState,
};
use axum::{
    http::HeaderValue,
    routing::{any, get},
    Router,
};
use log::*;
use std::path::Path;
use tower_http::{cors::CorsLayer, services::ServeDir};

pub fn define_routes(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state.config.allowed_origins);
    let static_dir = app_state.config.static_dir.clone();

    Router::new()
        .merge(sse_routes(app_state.clone()))
        .merge(trigger_routes(app_state))
        .merge(health_routes())
        .fallback_service(static_routes(&static_dir))
        .layer(cors)
}

fn sse_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/events", get(sse_handler))
        .with_state(app_state)
}

// The HTTP method carries no meaning here; any request fires the trigger.
fn trigger_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/trigger-update", any(trigger_controller::trigger_update))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

// Serves the browser page (index.html) and any other asset for every path
// not claimed by a route above.
pub fn static_routes(static_dir: &Path) -> ServeDir {
    ServeDir::new(static_dir)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {origin:?}: {e}");
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(origins)
}
