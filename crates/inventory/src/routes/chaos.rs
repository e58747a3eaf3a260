//! Fault injection toggles.

use axum::Json;
use axum::extract::State;
use common::{Status, ToggleRequest};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct CrashResponse {
    pub status: Status,
    pub crash: bool,
}

/// POST /chaos/crash — makes `/reserve` answer 503 while enabled.
pub async fn crash(
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Json<CrashResponse> {
    let crash = state.ledger.crash_switch().set(req.enabled);
    tracing::warn!(crash, "inventory crash switch toggled");
    Json(CrashResponse {
        status: Status::Ok,
        crash,
    })
}
