//! Ledger mutation endpoints.

use axum::Json;
use axum::extract::State;
use common::{ReleaseRequest, RemainingResponse, ResetRequest, SeatsRequest};

use crate::AppState;
use crate::error::LedgerError;

/// POST /reserve — atomic check-and-decrement.
#[tracing::instrument(skip_all, fields(event_id = %req.event_id, quantity = req.quantity))]
pub async fn reserve(
    State(state): State<AppState>,
    Json(req): Json<SeatsRequest>,
) -> Result<Json<RemainingResponse>, LedgerError> {
    match state.ledger.reserve(&req.event_id, req.quantity).await {
        Ok(remaining) => {
            metrics::counter!("inventory_reservations_total", "outcome" => "reserved")
                .increment(1);
            tracing::info!(remaining, "seats reserved");
            Ok(Json(RemainingResponse::ok(remaining)))
        }
        Err(e) => {
            let outcome = match e {
                LedgerError::InsufficientSeats { .. } => "conflict",
                LedgerError::Unavailable => "unavailable",
                LedgerError::InvalidQuantity => "invalid",
            };
            metrics::counter!("inventory_reservations_total", "outcome" => outcome).increment(1);
            tracing::info!(error = %e, "reservation refused");
            Err(e)
        }
    }
}

/// POST /release — compensating increment; always succeeds.
#[tracing::instrument(skip_all, fields(event_id = %req.event_id, quantity = req.quantity))]
pub async fn release(
    State(state): State<AppState>,
    Json(req): Json<ReleaseRequest>,
) -> Json<RemainingResponse> {
    let remaining = state.ledger.release(&req.event_id, req.quantity).await;
    metrics::counter!("inventory_releases_total").increment(1);
    tracing::info!(remaining, "seats released");
    Json(RemainingResponse::ok(remaining))
}

/// POST /admin/reset — unconditional overwrite.
#[tracing::instrument(skip_all, fields(event_id = %req.event_id, seats = req.seats))]
pub async fn reset(
    State(state): State<AppState>,
    Json(req): Json<ResetRequest>,
) -> Json<RemainingResponse> {
    let remaining = state.ledger.reset(&req.event_id, req.seats).await;
    tracing::info!("seats reset");
    Json(RemainingResponse::ok(remaining))
}
