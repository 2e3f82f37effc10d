//! Application configuration loaded from environment variables.

use std::time::Duration;

use order_store::RetryPolicy;

/// Service configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `ORDER_RETRY_MAX_ATTEMPTS` — attempts per store call, including the first (default: `3`)
/// - `ORDER_RETRY_BASE_DELAY_MS` — delay before the first retry (default: `100`)
/// - `ORDER_RETRY_MULTIPLIER` — backoff multiplier between attempts (default: `2.0`)
/// - `ORDER_RETRY_MAX_DELAY_MS` — upper bound on the retry delay (default: `5000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub retry_max_attempts: u32,
    pub retry_base_delay_ms: u64,
    pub retry_multiplier: f64,
    pub retry_max_delay_ms: u64,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            retry_max_attempts: env_parsed("ORDER_RETRY_MAX_ATTEMPTS", 3),
            retry_base_delay_ms: env_parsed("ORDER_RETRY_BASE_DELAY_MS", 100),
            retry_multiplier: env_parsed("ORDER_RETRY_MULTIPLIER", 2.0),
            retry_max_delay_ms: env_parsed("ORDER_RETRY_MAX_DELAY_MS", 5000),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Builds the retry policy described by this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_max_attempts,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            multiplier: self.retry_multiplier,
            max_delay: Duration::from_millis(self.retry_max_delay_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            retry_max_attempts: 3,
            retry_base_delay_ms: 100,
            retry_multiplier: 2.0,
            retry_max_delay_ms: 5000,
            log_level: "info".to_string(),
        }
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.retry_max_attempts, 3);
        assert_eq!(config.retry_base_delay_ms, 100);
        assert_eq!(config.retry_multiplier, 2.0);
        assert_eq!(config.retry_max_delay_ms, 5000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_retry_policy_conversion() {
        let config = Config {
            retry_max_attempts: 5,
            retry_base_delay_ms: 50,
            retry_multiplier: 1.5,
            retry_max_delay_ms: 1000,
            log_level: "debug".to_string(),
        };

        let policy = config.retry_policy();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.base_delay, Duration::from_millis(50));
        assert_eq!(policy.multiplier, 1.5);
        assert_eq!(policy.max_delay, Duration::from_millis(1000));
    }
}
