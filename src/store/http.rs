//! HTTP utilities for the Realtime Database REST API

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use url::Url;

/// Maximum length of response body to log (to avoid logging record contents)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and drops control characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let total = body.chars().count();
    let head: String = body
        .chars()
        .take(MAX_LOG_BODY_LENGTH)
        .filter(|c| !c.is_control())
        .collect();

    if total > MAX_LOG_BODY_LENGTH {
        format!("{}... [truncated, {} chars total]", head, total)
    } else {
        head
    }
}

/// Status and raw body of a completed request
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    /// The store only ever answers 200 on success
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Realtime Database answers `null` for an empty location
    pub fn is_null_document(&self) -> bool {
        let trimmed = self.body.trim();
        trimmed.is_empty() || trimmed == "null"
    }
}

/// HTTP client wrapper for store calls
#[derive(Clone)]
pub struct StoreHttpClient {
    client: Client,
}

impl StoreHttpClient {
    /// Create a new HTTP client
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("mdex/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    pub async fn get(&self, url: &Url) -> reqwest::Result<RawResponse> {
        self.send(Method::GET, url, None).await
    }

    pub async fn post(&self, url: &Url, body: &Value) -> reqwest::Result<RawResponse> {
        self.send(Method::POST, url, Some(body)).await
    }

    pub async fn put(&self, url: &Url, body: &Value) -> reqwest::Result<RawResponse> {
        self.send(Method::PUT, url, Some(body)).await
    }

    pub async fn delete(&self, url: &Url) -> reqwest::Result<RawResponse> {
        self.send(Method::DELETE, url, None).await
    }

    async fn send(
        &self,
        method: Method,
        url: &Url,
        body: Option<&Value>,
    ) -> reqwest::Result<RawResponse> {
        tracing::debug!("{} {}", method, redact(url));

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            // .json() also sets Content-Type: application/json
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            tracing::error!(
                "{} {} failed: {} - {}",
                method,
                redact(url),
                status,
                sanitize_for_log(&body)
            );
        } else {
            tracing::trace!("{} {} -> {}", method, redact(url), sanitize_for_log(&body));
        }

        Ok(RawResponse { status, body })
    }
}

/// Strip the auth token before a URL reaches the log
fn redact(url: &Url) -> String {
    if url.query_pairs().any(|(k, _)| k == "auth") {
        let mut clean = url.clone();
        clean.set_query(Some("auth=***"));
        clean.to_string()
    } else {
        url.to_string()
    }
}
