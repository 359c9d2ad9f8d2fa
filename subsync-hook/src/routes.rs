//! HTTP route handlers for the webhook API.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use serde::Serialize;
use subsync::event::WebhookEvent;
use subsync::sync::{SyncOutcome, handle_event};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/hook", post(subtask_event))
        .route("/sub-task-event", post(subtask_event))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// POST /hook - synchronise the parent of the subtask named in the event.
///
/// Absorbed outcomes (not a subtask, not needed, no direct transition) answer
/// `200`; a failed tracker call answers `502`.
async fn subtask_event(
    State(state): State<AppState>,
    Json(event): Json<WebhookEvent>,
) -> Result<Json<SyncOutcome>, (StatusCode, Json<ErrorBody>)> {
    match handle_event(state.tracker.as_ref(), &state.statuses, &event).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(err) => {
            warn!(error = %err, issue = %event.issue.key, "tracker call failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorBody {
                    error: err.to_string(),
                }),
            ))
        }
    }
}
