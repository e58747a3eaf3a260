use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};

use crate::AppState;
use crate::error::ProxyError;

/// POST /api/reserve — admits the request or answers 429, then relays the
/// orchestrator's answer unchanged.
pub async fn reserve(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, ProxyError> {
    let Some(slot) = state.gate.try_acquire() else {
        metrics::counter!("admission_rejected_total").increment(1);
        tracing::warn!(capacity = state.gate.capacity(), "admission gate saturated");
        return Err(ProxyError::Saturated);
    };
    metrics::gauge!("gateway_inflight").set(state.gate.in_flight() as f64);

    let result = forward(&state, payload).await;

    state.gate.release(slot);
    metrics::gauge!("gateway_inflight").set(state.gate.in_flight() as f64);
    result
}

async fn forward(
    state: &AppState,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, ProxyError> {
    let Json(body) = payload.map_err(|rejection| ProxyError::BadRequest(rejection.body_text()))?;

    match state.proxy.forward(&body).await {
        Ok((status, body)) => {
            tracing::info!(status = status.as_u16(), "reservation proxied");
            Ok((status, Json(body)).into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "reservation proxy failed");
            Err(e)
        }
    }
}
