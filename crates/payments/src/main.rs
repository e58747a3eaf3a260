//! Payment gateway entry point.

use common::http::shutdown_signal;
use payments::AppState;
use payments::config::Config;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    common::telemetry::init_tracing(&config.log_level, config.log_json);
    let metrics_handle =
        common::telemetry::install_metrics_recorder().expect("failed to install Prometheus recorder");

    let app = payments::create_app(AppState::new(), metrics_handle);

    let addr = config.addr();
    tracing::info!(%addr, "starting payment gateway");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
