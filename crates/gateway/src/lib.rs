//! API gateway: admission control and proxying to the reservation
//! orchestrator.
//!
//! Requests beyond the gate's capacity are refused with 429 before any
//! downstream call is made.

pub mod admission;
pub mod config;
pub mod error;
pub mod proxy;
pub mod routes;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

pub use admission::{AdmissionGate, AdmissionSlot};
pub use error::ProxyError;
pub use proxy::ReservationsProxy;

use config::Config;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub gate: AdmissionGate,
    pub proxy: ReservationsProxy,
}

impl AppState {
    pub fn new(gate: AdmissionGate, proxy: ReservationsProxy) -> Self {
        Self { gate, proxy }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            AdmissionGate::new(config.max_inflight),
            ReservationsProxy::new(
                reqwest::Client::new(),
                &config.reservations_url,
                config.upstream_timeout,
            ),
        )
    }
}

/// Creates the gateway router.
pub fn create_app(state: AppState, metrics_handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/", get(routes::landing::index))
        .route("/health", get(common::http::health))
        .route("/api/reserve", post(routes::reserve::reserve))
        .with_state(state)
        .merge(common::http::metrics_router(metrics_handle))
        .layer(TraceLayer::new_for_http())
}
