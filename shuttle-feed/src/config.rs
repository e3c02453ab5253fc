use std::{env, time::Duration};

pub const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:8080";
const ENDPOINT_VAR: &str = "SHUTTLE_FEED_ADDR";
const POLL_INTERVAL_MS: u64 = 250;
const CONNECT_TIMEOUT_SECS: u64 = 3;

/// Where the feed lives and how the reader paces itself.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    pub endpoint: String,
    /// Socket read timeout. Bounds how long closing a subscription waits for
    /// the reader to notice.
    pub poll_interval: Duration,
    pub connect_timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl FeedConfig {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
        }
    }

    /// Reads the endpoint from `SHUTTLE_FEED_ADDR`, falling back to the local
    /// simulator address.
    pub fn from_env() -> Self {
        match env::var(ENDPOINT_VAR) {
            Ok(endpoint) if !endpoint.trim().is_empty() => Self::new(endpoint.trim()),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_simulator() {
        let config = FeedConfig::default();

        assert_eq!(config.endpoint, "ws://127.0.0.1:8080");
        assert_eq!(config.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_new_keeps_endpoint() {
        assert_eq!(
            FeedConfig::new("wss://shuttle.example.org/feed").endpoint,
            "wss://shuttle.example.org/feed"
        );
    }
}
