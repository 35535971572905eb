//! HTTP client for the status backend API.

use chrono::Utc;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const REQUEST_FAILED: &str = "Request failed";

/// Backend client error types.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx response; `message` is taken from the body when possible.
    #[error("{message}")]
    Status { status: StatusCode, message: String },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// List endpoints wrap their records in an `items` key.
#[derive(Debug, Deserialize)]
struct ItemsPage<T> {
    items: Option<Vec<T>>,
}

/// Client for the backend's JSON API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Join the base URL and `path`, adding the leading slash if missing.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// GET `path` and decode the JSON body.
    ///
    /// `X-Request-Id` and `Accept` are filled in unless `headers` already
    /// carries them.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: HeaderMap,
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .get(self.url(path))
            .headers(with_default_headers(headers))
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(status, &content_type, &body);
            tracing::debug!("GET {} returned {}: {}", path, status, message);
            return Err(ClientError::Status { status, message });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// GET a list endpoint and return its `items`, empty when absent.
    pub async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ClientError> {
        let page: ItemsPage<T> = self.get_json(path, HeaderMap::new()).await?;
        Ok(page.items.unwrap_or_default())
    }
}

fn with_default_headers(mut headers: HeaderMap) -> HeaderMap {
    if !headers.contains_key(REQUEST_ID_HEADER) {
        if let Ok(value) = HeaderValue::from_str(&new_request_id()) {
            headers.insert(REQUEST_ID_HEADER, value);
        }
    }
    if !headers.contains_key(ACCEPT) {
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    }
    headers
}

/// Generate a request id of the form `req_<millis base36>_<8 random chars>`.
pub fn new_request_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let mut rng = rand::thread_rng();
    let suffix: String = (0..8)
        .filter_map(|_| std::char::from_digit(rng.gen_range(0..36), 36))
        .collect();

    format!("req_{}_{}", to_base36(millis), suffix)
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        if let Some(c) = std::char::from_digit((n % 36) as u32, 36) {
            digits.push(c);
        }
        n /= 36;
    }
    digits.iter().rev().collect()
}

/// Pick the most useful message out of a failed response.
///
/// JSON bodies are searched for `error.message`, then `message`; other
/// bodies are used verbatim. The status reason is the fallback.
pub fn error_message(status: StatusCode, content_type: &str, body: &str) -> String {
    let fallback = status.canonical_reason().unwrap_or(REQUEST_FAILED).to_string();

    if content_type.contains("application/json") {
        let Ok(payload) = serde_json::from_str::<Value>(body) else {
            return fallback;
        };
        return payload
            .pointer("/error/message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .or_else(|| {
                payload
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
            })
            .map(str::to_string)
            .unwrap_or(fallback);
    }

    if body.is_empty() {
        fallback
    } else {
        body.to_string()
    }
}
