//! Inventory service entry point.

use common::FaultSwitch;
use common::http::shutdown_signal;
use inventory::config::Config;
use inventory::{AppState, InventoryLedger};

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing and metrics
    common::telemetry::init_tracing(&config.log_level, config.log_json);
    let metrics_handle =
        common::telemetry::install_metrics_recorder().expect("failed to install Prometheus recorder");

    // 2. Seed the ledger
    let ledger = InventoryLedger::with_seed(config.seed.clone(), FaultSwitch::new());
    tracing::info!(seed = ?config.seed, "inventory ledger seeded");

    // 3. Build the application
    let app = inventory::create_app(AppState::new(ledger), metrics_handle);

    // 4. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting inventory service");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
