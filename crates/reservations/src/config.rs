//! Orchestrator configuration loaded from environment variables.

use std::time::Duration;

use saga::{RetryPolicy, SagaTimeouts};

/// Server and saga configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` / `PORT` — bind address (default: `0.0.0.0:5001`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT` — `json` for JSON lines
/// - `INVENTORY_URL`, `PAYMENTS_URL`, `NOTIFICATIONS_URL` — downstream base URLs
/// - `DB_PATH` — SQLite file (default: `"reservations.db"`); `:memory:` keeps
///   reservations in process memory
/// - `INVENTORY_TIMEOUT_MS`, `PAYMENT_TIMEOUT_MS`, `NOTIFY_TIMEOUT_MS`,
///   `RELEASE_TIMEOUT_MS` — per-step budgets (2000/3000/2000/2000)
/// - `STORE_MAX_ATTEMPTS`, `STORE_RETRY_DELAY_MS` — persistence retry (3, 300)
/// - `DB_FLAP_RATE` — failure probability while flapping is on (0.5)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_json: bool,
    pub inventory_url: String,
    pub payments_url: String,
    pub notifications_url: String,
    pub db_path: String,
    pub timeouts: SagaTimeouts,
    pub store_retry: RetryPolicy,
    pub db_flap_rate: f64,
}

/// `DB_PATH` value selecting the in-memory store.
pub const IN_MEMORY_DB: &str = ":memory:";

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            host: env_or("HOST", d.host),
            port: env_parse("PORT").unwrap_or(d.port),
            log_level: env_or("RUST_LOG", d.log_level),
            log_json: std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")),
            inventory_url: env_or("INVENTORY_URL", d.inventory_url),
            payments_url: env_or("PAYMENTS_URL", d.payments_url),
            notifications_url: env_or("NOTIFICATIONS_URL", d.notifications_url),
            db_path: env_or("DB_PATH", d.db_path),
            timeouts: SagaTimeouts {
                inventory: env_millis("INVENTORY_TIMEOUT_MS").unwrap_or(d.timeouts.inventory),
                payment: env_millis("PAYMENT_TIMEOUT_MS").unwrap_or(d.timeouts.payment),
                notification: env_millis("NOTIFY_TIMEOUT_MS").unwrap_or(d.timeouts.notification),
                release: env_millis("RELEASE_TIMEOUT_MS").unwrap_or(d.timeouts.release),
            },
            store_retry: RetryPolicy::fixed(
                env_parse("STORE_MAX_ATTEMPTS").unwrap_or(d.store_retry.max_attempts),
                env_millis("STORE_RETRY_DELAY_MS").unwrap_or(Duration::from_millis(300)),
            ),
            db_flap_rate: env_parse("DB_FLAP_RATE").unwrap_or(d.db_flap_rate),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_in_memory_store(&self) -> bool {
        self.db_path == IN_MEMORY_DB
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            log_level: "info".to_string(),
            log_json: false,
            inventory_url: "http://localhost:5002".to_string(),
            payments_url: "http://localhost:5003".to_string(),
            notifications_url: "http://localhost:5004".to_string(),
            db_path: "reservations.db".to_string(),
            timeouts: SagaTimeouts::default(),
            store_retry: RetryPolicy::default(),
            db_flap_rate: 0.5,
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn env_millis(key: &str) -> Option<Duration> {
    env_parse::<u64>(key).map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.port, 5001);
        assert_eq!(config.inventory_url, "http://localhost:5002");
        assert_eq!(config.payments_url, "http://localhost:5003");
        assert_eq!(config.notifications_url, "http://localhost:5004");
        assert_eq!(config.timeouts.inventory, Duration::from_secs(2));
        assert_eq!(config.timeouts.payment, Duration::from_secs(3));
        assert_eq!(config.store_retry, RetryPolicy::default());
        assert!(!config.uses_in_memory_store());
    }

    #[test]
    fn test_in_memory_marker() {
        let config = Config {
            db_path: IN_MEMORY_DB.to_string(),
            ..Config::default()
        };
        assert!(config.uses_in_memory_store());
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }
}
