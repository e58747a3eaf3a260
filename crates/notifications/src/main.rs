//! Notification sink entry point.

use common::http::shutdown_signal;
use notifications::AppState;
use notifications::config::Config;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    common::telemetry::init_tracing(&config.log_level, config.log_json);
    let metrics_handle =
        common::telemetry::install_metrics_recorder().expect("failed to install Prometheus recorder");

    let app = notifications::create_app(AppState::default(), metrics_handle);

    let addr = config.addr();
    tracing::info!(%addr, "starting notification service");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
