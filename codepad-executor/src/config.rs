//! Client configuration.

use std::time::Duration;

/// Default public Piston endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://emkc.org/api/v2/piston/execute";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const ENDPOINT_VAR: &str = "CODEPAD_ENDPOINT";
const TIMEOUT_VAR: &str = "CODEPAD_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Full URL of the execute endpoint.
    pub endpoint: String,
    /// Applies to the whole request; expiry surfaces as a transport error.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("codepad/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `CODEPAD_ENDPOINT` and `CODEPAD_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_VAR).filter(|s| !s.trim().is_empty()) {
            config.endpoint = endpoint.trim().to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!("Ignoring invalid {}={:?}", TIMEOUT_VAR, raw),
            }
        }

        config
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.user_agent.starts_with("codepad/"));
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENDPOINT_VAR, "http://localhost:2000/api/v2/execute"),
            (TIMEOUT_VAR, "5"),
        ]));
        assert_eq!(config.endpoint, "http://localhost:2000/api/v2/execute");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout_keeps_default() {
        let config = ClientConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")]));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        let config = ClientConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "0")]));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_builder_methods() {
        let config = ClientConfig::default()
            .with_endpoint("http://x/execute")
            .with_timeout(Duration::from_millis(250));
        assert_eq!(config.endpoint, "http://x/execute");
        assert_eq!(config.timeout, Duration::from_millis(250));
    }
}
