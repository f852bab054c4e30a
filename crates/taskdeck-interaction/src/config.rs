//! API client configuration.
//!
//! Configuration priority: explicit constructor > environment variable >
//! built-in default, the same chain the backend URL follows in every
//! deployment of the original service.

use std::env;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings shared by every API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout applied through reqwest.
    pub request_timeout: Duration,
}

impl ApiConfig {
    /// Creates a config pointing at an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Loads the base URL from `TASKDECK_API_URL`, falling back to the
    /// local development default.
    pub fn from_env() -> Self {
        let base_url =
            env::var("TASKDECK_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Overrides the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Joins a path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
