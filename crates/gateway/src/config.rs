//! Gateway configuration loaded from environment variables.

use std::time::Duration;

/// Reads from environment variables:
/// - `HOST` / `PORT` — bind address (default: `0.0.0.0:5000`)
/// - `RUST_LOG`, `LOG_FORMAT`
/// - `RESERVATIONS_URL` — orchestrator base URL (default: `http://localhost:5001`)
/// - `MAX_INFLIGHT` — admission capacity (default: `5`)
/// - `UPSTREAM_TIMEOUT_MS` — deadline for the proxied call (default: `5000`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_json: bool,
    pub reservations_url: String,
    pub max_inflight: usize,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: env_parse("PORT").unwrap_or(defaults.port),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_json: std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")),
            reservations_url: std::env::var("RESERVATIONS_URL").unwrap_or(defaults.reservations_url),
            max_inflight: env_parse("MAX_INFLIGHT").unwrap_or(defaults.max_inflight),
            upstream_timeout: env_parse("UPSTREAM_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.upstream_timeout),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            log_level: "info".to_string(),
            log_json: false,
            reservations_url: "http://localhost:5001".to_string(),
            max_inflight: 5,
            upstream_timeout: Duration::from_secs(5),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
