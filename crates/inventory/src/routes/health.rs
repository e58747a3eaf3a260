//! Health check endpoint.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use common::Status;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: Status,
    pub seats: BTreeMap<String, u32>,
}

/// GET /health — liveness plus a snapshot of the ledger.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: Status::Ok,
        seats: state.ledger.snapshot().await,
    })
}
