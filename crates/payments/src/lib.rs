//! Payment gateway stand-in.
//!
//! Approves every charge for `price * quantity` unless told otherwise
//! through the chaos endpoints. Latency is applied before the decision.

pub mod config;
pub mod routes;

use axum::Router;
use axum::routing::{get, post};
use common::{FaultSwitch, LatencyKnob};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

/// Fault state shared by every handler.
#[derive(Clone, Default)]
pub struct AppState {
    pub fail: FaultSwitch,
    pub latency: LatencyKnob,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Creates the payment gateway router.
pub fn create_app(state: AppState, metrics_handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/health", get(common::http::health))
        .route("/pay", post(routes::pay))
        .route("/chaos/latency", post(routes::set_latency))
        .route("/chaos/fail", post(routes::set_fail))
        .with_state(state)
        .merge(common::http::metrics_router(metrics_handle))
        .layer(TraceLayer::new_for_http())
}
