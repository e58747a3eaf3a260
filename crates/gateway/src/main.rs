//! Gateway entry point.

use common::http::shutdown_signal;
use gateway::AppState;
use gateway::config::Config;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing and metrics
    common::telemetry::init_tracing(&config.log_level, config.log_json);
    let metrics_handle =
        common::telemetry::install_metrics_recorder().expect("failed to install Prometheus recorder");

    // 2. Build the application
    let state = AppState::from_config(&config);
    tracing::info!(
        max_inflight = config.max_inflight,
        upstream = %config.reservations_url,
        timeout_ms = config.upstream_timeout.as_millis() as u64,
        "admission gate configured"
    );
    let app = gateway::create_app(state, metrics_handle);

    // 3. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting gateway");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
