use std::time::Duration;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::http::error_response;
use common::{Status, ToggleRequest, default_quantity};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Charge request. Extra fields sent by the orchestrator are ignored.
#[derive(Debug, Deserialize)]
pub struct PayRequest {
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

#[derive(Serialize)]
pub struct PayResponse {
    pub status: Status,
    pub message: String,
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct LatencyRequest {
    #[serde(default)]
    pub seconds: f64,
}

#[derive(Serialize)]
pub struct LatencyResponse {
    pub status: Status,
    pub latency: f64,
}

#[derive(Serialize)]
pub struct FailResponse {
    pub status: Status,
    pub fail: bool,
}

/// POST /pay
pub async fn pay(State(state): State<AppState>, Json(req): Json<PayRequest>) -> Response {
    state.latency.apply().await;

    if state.fail.is_enabled() {
        metrics::counter!("payments_total", "outcome" => "rejected").increment(1);
        tracing::warn!(price = req.price, quantity = req.quantity, "payment rejected");
        return error_response(
            StatusCode::BAD_GATEWAY,
            "payment rejected by provider (simulated)",
        );
    }

    let amount = req.price * f64::from(req.quantity);
    metrics::counter!("payments_total", "outcome" => "approved").increment(1);
    tracing::info!(amount, "payment approved");
    Json(PayResponse {
        status: Status::Ok,
        message: "payment approved".to_string(),
        amount,
    })
    .into_response()
}

/// Longest delay `/chaos/latency` accepts; larger values are capped.
pub const MAX_LATENCY_SECS: f64 = 300.0;

/// POST /chaos/latency — delay applied to every charge. Negative or
/// non-finite values clear it.
pub async fn set_latency(
    State(state): State<AppState>,
    Json(req): Json<LatencyRequest>,
) -> Json<LatencyResponse> {
    let seconds = if req.seconds.is_finite() && req.seconds > 0.0 {
        req.seconds.min(MAX_LATENCY_SECS)
    } else {
        0.0
    };
    let delay = Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO);
    state.latency.set(delay);
    tracing::warn!(seconds, "payment latency set");
    Json(LatencyResponse {
        status: Status::Ok,
        latency: seconds,
    })
}

/// POST /chaos/fail
pub async fn set_fail(
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Json<FailResponse> {
    let fail = state.fail.set(req.enabled);
    tracing::warn!(fail, "payment failure switch toggled");
    Json(FailResponse {
        status: Status::Ok,
        fail,
    })
}
