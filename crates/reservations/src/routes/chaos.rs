//! Fault injection toggles.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::{Status, ToggleRequest};
use saga::{InventoryClient, NotificationClient, PaymentClient};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct FlapResponse {
    pub status: Status,
    pub db_flapping: bool,
}

/// POST /chaos/db_flap — makes store writes fail randomly while enabled.
pub async fn db_flap<I, P, N>(
    State(state): State<Arc<AppState<I, P, N>>>,
    Json(req): Json<ToggleRequest>,
) -> Json<FlapResponse>
where
    I: InventoryClient + 'static,
    P: PaymentClient + 'static,
    N: NotificationClient + 'static,
{
    let db_flapping = state.db_flapping().set(req.enabled);
    tracing::warn!(db_flapping, "database flapping toggled");
    Json(FlapResponse {
        status: Status::Ok,
        db_flapping,
    })
}
