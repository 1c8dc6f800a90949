use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Local;
use sse::message::Message;

/// ANY /trigger-update
///
/// Broadcasts one timestamped update to every open event stream, then
/// acknowledges the trigger. The response says nothing about how many
/// clients received it, and any request body is ignored.
pub async fn trigger_update(State(app_state): State<AppState>) -> impl IntoResponse {
    app_state
        .sse_manager
        .broadcast(Message::update_triggered(Local::now()));

    (StatusCode::OK, "Update triggered\n")
}
