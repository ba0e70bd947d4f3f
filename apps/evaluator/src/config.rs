use std::time::Duration;

use anyhow::{Context, Result};

use crate::eval_client::DEFAULT_ENDPOINT;

/// Client configuration loaded from environment variables.
/// Every variable has a default, so an empty environment is valid.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    /// Request deadline. `None` means wait for the transport.
    pub timeout: Option<Duration>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout = match lookup("EVALUATOR_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(
                raw.parse::<u64>()
                    .context("EVALUATOR_TIMEOUT_SECS must be a whole number of seconds")?,
            )),
            None => None,
        };

        Ok(Config {
            endpoint: lookup("EVALUATOR_URL").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, None);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("EVALUATOR_URL", "http://localhost:8000/evaluate"),
            ("EVALUATOR_TIMEOUT_SECS", "30"),
        ])
        .unwrap();
        assert_eq!(config.endpoint, "http://localhost:8000/evaluate");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_bad_timeout_rejected() {
        let err = config_from(&[("EVALUATOR_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("EVALUATOR_TIMEOUT_SECS"));
    }
}
