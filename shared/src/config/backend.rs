//! REST backend connection configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Where and how the client talks to the REST backend
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the API, without trailing slash
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Use the in-process mock backend instead of HTTP
    #[serde(default)]
    pub use_mock: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8080/api/v1"),
            request_timeout_secs: default_request_timeout(),
            use_mock: true,
        }
    }
}

impl BackendConfig {
    /// Create a config pointing at the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout_secs: default_request_timeout(),
            use_mock: false,
        }
    }

    /// Load from `API_BASE_URL`, `API_TIMEOUT_SECS` and `API_USE_MOCK`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            request_timeout_secs: env::var("API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            use_mock: env::var("API_USE_MOCK")
                .ok()
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.use_mock),
        }
    }

    /// Join an endpoint path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn default_request_timeout() -> u64 {
    10
}
