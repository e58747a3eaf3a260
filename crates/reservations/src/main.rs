//! Reservation orchestrator entry point.

use common::http::shutdown_signal;
use reservations::config::Config;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing and metrics
    common::telemetry::init_tracing(&config.log_level, config.log_json);
    let metrics_handle =
        common::telemetry::install_metrics_recorder().expect("failed to install Prometheus recorder");

    // 2. Open the store and wire the saga
    let state = reservations::create_default_state(&config)
        .await
        .expect("failed to open reservation store");
    tracing::info!(
        inventory = %config.inventory_url,
        payments = %config.payments_url,
        notifications = %config.notifications_url,
        "downstream services configured"
    );

    // 3. Build the application
    let app = reservations::create_app(state, metrics_handle);

    // 4. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting reservation orchestrator");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
