//! Configuration module for statusboard.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port for the web server (default: 8080)
    pub http_port: u16,
    /// Base URL of the status backend API
    pub api_base_url: String,
    /// Seconds between background refreshes; 0 disables them (default: 60)
    pub refresh_secs: u64,
    /// Per-request timeout for backend calls (default: 10)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            api_base_url: "http://localhost:8000/api/v1".to_string(),
            refresh_secs: 60,
            request_timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `STATUSBOARD_HTTP_PORT`: HTTP port (default: 8080)
    /// - `STATUSBOARD_API_BASE_URL`: backend base URL (default: "http://localhost:8000/api/v1")
    /// - `STATUSBOARD_REFRESH_SECS`: refresh interval in seconds (default: 60)
    /// - `STATUSBOARD_REQUEST_TIMEOUT_SECS`: request timeout in seconds (default: 10)
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(port) = lookup("STATUSBOARD_HTTP_PORT").and_then(|s| s.parse().ok()) {
            cfg.http_port = port;
        }

        if let Some(url) = lookup("STATUSBOARD_API_BASE_URL").filter(|s| !s.trim().is_empty()) {
            cfg.api_base_url = url;
        }

        if let Some(secs) = lookup("STATUSBOARD_REFRESH_SECS").and_then(|s| s.parse().ok()) {
            cfg.refresh_secs = secs;
        }

        if let Some(secs) = lookup("STATUSBOARD_REQUEST_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            cfg.request_timeout_secs = secs;
        }

        cfg
    }

    /// Background refresh period, or `None` when disabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_secs > 0).then(|| Duration::from_secs(self.refresh_secs))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
