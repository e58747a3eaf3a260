use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use common::{ReservationRequest, Status};
use saga::{
    Confirmation, ConfirmedReservation, InventoryClient, NotificationClient, NotificationOutcome,
    PaymentClient,
};
use serde::Serialize;

use crate::AppState;
use crate::error::ApiError;

#[derive(Serialize)]
pub struct ReserveResponse {
    pub status: Status,
    pub message: String,
    pub reservation_id: i64,
    pub saga_id: String,
    pub notification: NotificationOutcome,
}

impl From<Confirmation> for ReserveResponse {
    fn from(confirmation: Confirmation) -> Self {
        Self {
            status: Status::Ok,
            message: "reservation confirmed".to_string(),
            reservation_id: confirmation.reservation.id,
            saga_id: confirmation.saga_id.to_string(),
            notification: confirmation.notification,
        }
    }
}

#[derive(Serialize)]
pub struct ReservationListResponse {
    pub status: Status,
    pub reservations: Vec<ConfirmedReservation>,
}

/// POST /reserve — runs the booking saga for one request.
pub async fn create<I, P, N>(
    State(state): State<Arc<AppState<I, P, N>>>,
    payload: Result<Json<ReservationRequest>, JsonRejection>,
) -> Result<Json<ReserveResponse>, ApiError>
where
    I: InventoryClient + 'static,
    P: PaymentClient + 'static,
    N: NotificationClient + 'static,
{
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let confirmation = state.orchestrator.execute(request).await?;
    Ok(Json(ReserveResponse::from(confirmation)))
}

/// GET /reservations — every persisted reservation in id order.
pub async fn list<I, P, N>(
    State(state): State<Arc<AppState<I, P, N>>>,
) -> Result<Json<ReservationListResponse>, ApiError>
where
    I: InventoryClient + 'static,
    P: PaymentClient + 'static,
    N: NotificationClient + 'static,
{
    let reservations = state.orchestrator.writer().store().list().await?;
    Ok(Json(ReservationListResponse {
        status: Status::Ok,
        reservations,
    }))
}
