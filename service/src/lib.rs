use config::Config;
use sse::Manager;
use std::sync::Arc;

pub mod config;
pub mod logging;

// Service-level state shared by every request handler
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub sse_manager: Arc<Manager>,
    pub config: Config,
}

impl AppState {
    pub fn new(app_config: Config, sse_manager: &Arc<Manager>) -> Self {
        Self {
            sse_manager: Arc::clone(sse_manager),
            config: app_config,
        }
    }
}
