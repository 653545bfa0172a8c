//! Runtime configuration for the gatherer.
//!
//! Built once from CLI arguments / environment variables by the binary and
//! handed to [`crate::Orchestrator`]. Credential presence is deliberately not
//! checked here: `Session::login` owns that check so the failure carries the
//! library error type.

use eyre::Result;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Default management API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.leasewebultracdn.com";

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub api_url: Url,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub request_timeout: Duration,
    pub max_concurrent_gathers: usize,
}

impl Config {
    pub fn new(
        api_url: &str,
        username: String,
        password: String,
        request_timeout: Duration,
        max_concurrent_gathers: usize,
    ) -> Result<Self> {
        let api_url = Url::parse(api_url)?;
        if !matches!(api_url.scheme(), "http" | "https") {
            eyre::bail!("API URL must be http(s), got: {api_url}");
        }
        if max_concurrent_gathers == 0 {
            eyre::bail!("max_concurrent_gathers must be at least 1");
        }
        Ok(Self {
            api_url,
            username,
            password,
            request_timeout,
            max_concurrent_gathers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_url: &str) -> Result<Config> {
        Config::new(
            api_url,
            "user".to_string(),
            "secret".to_string(),
            Duration::from_secs(30),
            4,
        )
    }

    #[test]
    fn accepts_the_default_endpoint() {
        let config = config(DEFAULT_API_URL).unwrap();
        assert_eq!(config.api_url.scheme(), "https");
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(config("ftp://api.example.test").is_err());
        assert!(config("not a url").is_err());
    }

    #[test]
    fn rejects_a_zero_concurrency_limit() {
        let result = Config::new(
            DEFAULT_API_URL,
            "user".to_string(),
            "secret".to_string(),
            Duration::from_secs(30),
            0,
        );
        assert!(result.is_err());
    }
}
