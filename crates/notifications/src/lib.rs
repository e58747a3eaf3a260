//! Notification sink stand-in. Accepts every message unless switched down.

pub mod config;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use common::http::error_response;
use common::{FaultSwitch, Status, ToggleRequest};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

#[derive(Clone, Default)]
pub struct AppState {
    pub down: FaultSwitch,
}

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Serialize)]
pub struct SendResponse {
    pub status: Status,
    pub message: String,
    pub user_id: Option<String>,
}

#[derive(Serialize)]
pub struct DownResponse {
    pub status: Status,
    pub down: bool,
}

/// Creates the notification router.
pub fn create_app(state: AppState, metrics_handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/health", get(common::http::health))
        .route("/send", post(send))
        .route("/chaos/down", post(set_down))
        .with_state(state)
        .merge(common::http::metrics_router(metrics_handle))
        .layer(TraceLayer::new_for_http())
}

/// POST /send — answers 503 while the outage switch is on.
async fn send(State(state): State<AppState>, Json(req): Json<SendRequest>) -> Response {
    if state.down.is_enabled() {
        metrics::counter!("notifications_total", "outcome" => "down").increment(1);
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "notification service down (simulated)",
        );
    }

    metrics::counter!("notifications_total", "outcome" => "sent").increment(1);
    tracing::info!(user_id = ?req.user_id, "notification sent");
    Json(SendResponse {
        status: Status::Ok,
        message: "email sent".to_string(),
        user_id: req.user_id,
    })
    .into_response()
}

/// POST /chaos/down
async fn set_down(
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Json<DownResponse> {
    let down = state.down.set(req.enabled);
    tracing::warn!(down, "notification outage toggled");
    Json(DownResponse {
        status: Status::Ok,
        down,
    })
}
