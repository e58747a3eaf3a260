//! Inventory service configuration loaded from environment variables.

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `5002`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT` — `json` for JSON lines, anything else for plain text
/// - `INVENTORY_SEED` — initial seats as `event=seats` pairs separated by commas
///   (default: `"concert-01=5,concert-02=3"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_json: bool,
    pub seed: Vec<(String, u32)>,
}

const DEFAULT_SEED: &str = "concert-01=5,concert-02=3";

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_json: std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")),
            seed: std::env::var("INVENTORY_SEED")
                .map(|s| parse_seed(&s))
                .unwrap_or(defaults.seed),
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
            port: 5002,
            log_level: "info".to_string(),
            log_json: false,
            seed: parse_seed(DEFAULT_SEED),
        }
    }
}

/// Parses `"a=5,b=3"` into pairs. Malformed entries are skipped.
pub fn parse_seed(raw: &str) -> Vec<(String, u32)> {
    raw.split(',')
        .filter_map(|pair| {
            let (event, seats) = pair.split_once('=')?;
            let event = event.trim();
            if event.is_empty() {
                return None;
            }
            Some((event.to_string(), seats.trim().parse().ok()?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.port, 5002);
        assert_eq!(
            config.seed,
            vec![
                ("concert-01".to_string(), 5),
                ("concert-02".to_string(), 3)
            ]
        );
    }

    #[test]
    fn test_parse_seed_skips_garbage() {
        let seed = parse_seed("a=1, b = 2,broken,=4,c=x");
        assert_eq!(seed, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
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
