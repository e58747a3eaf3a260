//! Reservation orchestrator HTTP service.
//!
//! Exposes the booking saga over `POST /reserve`, a reconciliation listing of
//! persisted reservations, and the database flapping toggle.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use common::FaultSwitch;
use metrics_exporter_prometheus::PrometheusHandle;
use saga::{
    FlapFault, HttpInventoryClient, HttpNotificationClient, HttpPaymentClient,
    InMemoryReservationStore, InventoryClient, NotificationClient, Orchestrator, PaymentClient,
    ReservationStore, ReservationWriter, SqliteReservationStore, StoreError,
};
use tower_http::trace::TraceLayer;

use config::Config;

/// Store backend chosen at startup.
pub type SharedStore = Arc<dyn ReservationStore>;

/// Orchestrator wired to the real downstream services.
pub type HttpOrchestrator =
    Orchestrator<HttpInventoryClient, HttpPaymentClient, SharedStore, HttpNotificationClient>;

/// Shared application state.
pub struct AppState<I, P, N>
where
    I: InventoryClient,
    P: PaymentClient,
    N: NotificationClient,
{
    pub orchestrator: Orchestrator<I, P, SharedStore, N>,
}

impl<I, P, N> AppState<I, P, N>
where
    I: InventoryClient,
    P: PaymentClient,
    N: NotificationClient,
{
    pub fn new(orchestrator: Orchestrator<I, P, SharedStore, N>) -> Self {
        Self { orchestrator }
    }

    /// Flag read by the store writer on every attempt.
    pub fn db_flapping(&self) -> &FaultSwitch {
        self.orchestrator.writer().flap().switch()
    }
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<I, P, N>(state: Arc<AppState<I, P, N>>, metrics_handle: PrometheusHandle) -> Router
where
    I: InventoryClient + 'static,
    P: PaymentClient + 'static,
    N: NotificationClient + 'static,
{
    Router::new()
        .route("/health", get(common::http::health))
        .route("/reserve", post(routes::reserve::create::<I, P, N>))
        .route("/reservations", get(routes::reserve::list::<I, P, N>))
        .route("/chaos/db_flap", post(routes::chaos::db_flap::<I, P, N>))
        .with_state(state)
        .merge(common::http::metrics_router(metrics_handle))
        .layer(TraceLayer::new_for_http())
}

/// Opens the store named by `DB_PATH`.
pub async fn open_store(config: &Config) -> Result<SharedStore, StoreError> {
    if config.uses_in_memory_store() {
        tracing::info!("using in-memory reservation store");
        return Ok(Arc::new(InMemoryReservationStore::new()));
    }
    let store = SqliteReservationStore::connect(&config.db_path).await?;
    tracing::info!(path = %config.db_path, "using SQLite reservation store");
    Ok(Arc::new(store))
}

/// Builds the orchestrator against the downstream URLs in `config`.
///
/// The HTTP clients carry no timeout of their own; each saga step applies
/// its own budget.
pub async fn create_default_state(
    config: &Config,
) -> Result<Arc<AppState<HttpInventoryClient, HttpPaymentClient, HttpNotificationClient>>, StoreError>
{
    let store = open_store(config).await?;
    let http = reqwest::Client::new();

    let writer = ReservationWriter::new(
        store,
        config.store_retry.clone(),
        FlapFault::new(FaultSwitch::new(), config.db_flap_rate),
    );
    let orchestrator: HttpOrchestrator = Orchestrator::new(
        HttpInventoryClient::new(http.clone(), &config.inventory_url),
        HttpPaymentClient::new(http.clone(), &config.payments_url),
        writer,
        HttpNotificationClient::new(http, &config.notifications_url),
        config.timeouts.clone(),
    );

    Ok(Arc::new(AppState::new(orchestrator)))
}
