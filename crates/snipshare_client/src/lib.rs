//! HTTP client for publishing snippets to and fetching them from a share server.

/// Client error type.
pub mod error;

pub use error::ClientError;

use reqwest::{StatusCode, Url};
use serde_json::Value;
use snipshare_core::models::share::{PublishRequest, ShareReceipt, SharedSnippetContent};
use snipshare_core::Config;
use std::time::Duration;

const API_SEGMENTS: [&str; 2] = ["api", "snippets"];

/// Build an endpoint URL by appending path segments to `server`.
///
/// Segments are percent-encoded, so a share id can never escape its path slot.
///
/// # Errors
/// Returns [`ClientError::InvalidUrl`] when `server` does not parse or cannot
/// carry a path.
pub fn api_url(server: &str, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = Url::parse(server)
        .map_err(|err| ClientError::InvalidUrl(format!("'{}': {}", server, err)))?;
    let mut path = url.path_segments_mut().map_err(|_| {
        ClientError::InvalidUrl(format!("'{}' cannot be used as an API base", server))
    })?;
    path.pop_if_empty();
    for segment in segments {
        path.push(segment);
    }
    drop(path);
    Ok(url)
}

/// Canonicalize a server URL: `localhost` becomes `127.0.0.1` over plain HTTP
/// and trailing slashes are dropped. Unparseable input is returned unchanged.
pub fn normalize_server(server: &str) -> String {
    let Ok(mut url) = Url::parse(server) else {
        return server.to_string();
    };
    let should_normalize_localhost =
        url.scheme().eq_ignore_ascii_case("http") && url.host_str() == Some("localhost");
    if should_normalize_localhost && url.set_host(Some("127.0.0.1")).is_err() {
        return server.to_string();
    }
    let mut normalized = url.to_string();
    while normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Extract a human-readable message from an error response body.
///
/// Prefers the JSON `error` field, then the raw body, then the status reason.
pub fn error_message_for_response(status: StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return value
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or(body)
            .to_string();
    }

    body.to_string()
}

/// Client for a remote share server.
///
/// Holds no per-call state: every method issues one independent request and
/// never retries. Cancelling a pending [`Self::publish`] does not undo a
/// publish the server already committed.
#[derive(Debug, Clone)]
pub struct ShareClient {
    http: reqwest::Client,
    server: String,
}

impl ShareClient {
    /// Create a client for `server` with a per-request `timeout`.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidUrl`] for an unusable server URL, or
    /// [`ClientError::Transport`] when the HTTP client cannot be built.
    pub fn new(server: &str, timeout: Duration) -> Result<Self, ClientError> {
        let server = normalize_server(server.trim());
        api_url(&server, &API_SEGMENTS)?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, server })
    }

    /// Create a client from the `SHARE_SERVER` / `SHARE_TIMEOUT_SECS` settings.
    ///
    /// # Errors
    /// Same as [`Self::new`].
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(
            &config.share_server,
            Duration::from_secs(config.share_timeout_secs),
        )
    }

    /// Server base URL this client targets.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Publish `content` and return the full receipt.
    ///
    /// # Arguments
    /// - `content`: Body to publish; must be non-blank.
    /// - `language`: Optional tag; the server defaults it to `"plaintext"`.
    /// - `ttl_days`: Days until expiry; `None` never expires, `Some(0)` is rejected.
    ///
    /// # Errors
    /// [`ClientError::Validation`] before sending for blank content or a zero
    /// TTL; [`ClientError::Transport`] on connection failure or timeout;
    /// [`ClientError::Status`] on a non-2xx answer;
    /// [`ClientError::InvalidResponse`] when the body is not a receipt.
    pub async fn publish(
        &self,
        content: &str,
        language: Option<&str>,
        ttl_days: Option<u32>,
    ) -> Result<ShareReceipt, ClientError> {
        if content.trim().is_empty() {
            return Err(ClientError::Validation("Content cannot be empty".to_string()));
        }
        if ttl_days == Some(0) {
            return Err(ClientError::Validation(
                "expires_in_days must be at least 1".to_string(),
            ));
        }

        let request = PublishRequest {
            content: content.to_string(),
            language: language.map(str::to_string),
            expires_in_days: ttl_days.map(i64::from),
        };
        let endpoint = api_url(&self.server, &API_SEGMENTS)?;
        let res = self.http.post(endpoint).json(&request).send().await?;
        let body = success_body(res).await?;
        let receipt: ShareReceipt = parse_body(&body)?;

        tracing::debug!("Published share {} to {}", receipt.share_id, self.server);
        Ok(receipt)
    }

    /// Publish `content` and return its public URL exactly as the server built it.
    ///
    /// # Errors
    /// Same as [`Self::publish`].
    pub async fn share(
        &self,
        content: &str,
        language: Option<&str>,
        ttl_days: Option<u32>,
    ) -> Result<String, ClientError> {
        Ok(self.publish(content, language, ttl_days).await?.url)
    }

    /// Fetch a published snippet.
    ///
    /// # Returns
    /// `Ok(None)` when the server reports the id as unknown or expired.
    ///
    /// # Errors
    /// Transport, status, and response-shape failures as for [`Self::publish`].
    pub async fn fetch(&self, share_id: &str) -> Result<Option<SharedSnippetContent>, ClientError> {
        let endpoint = api_url(&self.server, &[API_SEGMENTS[0], API_SEGMENTS[1], share_id])?;
        let res = self.http.get(endpoint).send().await?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = success_body(res).await?;
        parse_body(&body).map(Some)
    }
}

async fn success_body(res: reqwest::Response) -> Result<String, ClientError> {
    let status = res.status();
    let body = res.text().await?;
    if status.is_success() {
        return Ok(body);
    }
    Err(ClientError::Status {
        status,
        message: error_message_for_response(status, &body),
    })
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|err| ClientError::InvalidResponse(err.to_string()))
}
