//! Bridge polling configuration.

use std::time::Duration;

/// Environment variable overriding the default bridge base URL.
pub const BRIDGE_URL_ENV: &str = "SCREENER_BRIDGE_URL";

/// Configuration for the bridge polling client.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Bridge API base URL.
    pub base_url: String,
    /// Path of the rows endpoint, joined onto the base URL.
    pub rows_path: String,
    /// Interval between snapshot fetches.
    pub poll_interval: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8040".to_string(),
            rows_path: "/api/rows".to_string(),
            poll_interval: Duration::from_secs(60),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl BridgeConfig {
    /// Create a configuration with a custom base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Default configuration with the base URL taken from
    /// `SCREENER_BRIDGE_URL` when set.
    pub fn from_env() -> Self {
        match std::env::var(BRIDGE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    /// Set the rows endpoint path.
    pub fn with_rows_path(mut self, path: impl Into<String>) -> Self {
        self.rows_path = path.into();
        self
    }

    /// Set the polling interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.poll_interval, Duration::from_secs(60));
        assert_eq!(cfg.rows_path, "/api/rows");
    }

    #[test]
    fn test_builder_methods() {
        let cfg = BridgeConfig::new("http://bridge.internal:9000")
            .with_rows_path("/axi/screener")
            .with_poll_interval(Duration::from_secs(5))
            .with_request_timeout(Duration::from_secs(2));

        assert_eq!(cfg.base_url, "http://bridge.internal:9000");
        assert_eq!(cfg.rows_path, "/axi/screener");
        assert_eq!(cfg.poll_interval, Duration::from_secs(5));
        assert_eq!(cfg.request_timeout, Duration::from_secs(2));
    }
}
