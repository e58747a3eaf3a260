//! Inventory service: the seat ledger and its HTTP surface.
//!
//! The ledger is the only state in the system mutated by concurrent callers.
//! See [`ledger`] for the locking discipline.

pub mod config;
pub mod error;
pub mod ledger;
pub mod routes;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

pub use error::LedgerError;
pub use ledger::InventoryLedger;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub ledger: InventoryLedger,
}

impl AppState {
    pub fn new(ledger: InventoryLedger) -> Self {
        Self { ledger }
    }
}

/// Creates the inventory router.
pub fn create_app(state: AppState, metrics_handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/health", get(routes::health::check))
        .route("/reserve", post(routes::seats::reserve))
        .route("/release", post(routes::seats::release))
        .route("/admin/reset", post(routes::seats::reset))
        .route("/chaos/crash", post(routes::chaos::crash))
        .with_state(state)
        .merge(common::http::metrics_router(metrics_handle))
        .layer(TraceLayer::new_for_http())
}
