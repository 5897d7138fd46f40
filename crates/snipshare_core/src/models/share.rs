//! Shared snippet rows and the publish/fetch wire payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published snippet as stored by the share registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SharedSnippet {
    pub share_id: String,
    pub content: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SharedSnippet {
    /// Whether the row must no longer be served at `now`.
    ///
    /// Expiry is strict: a row is still live at exactly `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at < now)
    }
}

/// Publish request body (`POST /api/snippets`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Signed so that zero and negative values reach validation instead of
    /// failing deserialization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<i64>,
}

/// Publish response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareReceipt {
    pub share_id: String,
    pub url: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Fetch response body (`GET /api/snippets/:share_id`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SharedSnippetContent {
    pub content: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
}

impl From<SharedSnippet> for SharedSnippetContent {
    fn from(value: SharedSnippet) -> Self {
        Self {
            content: value.content,
            language: value.language,
            created_at: value.created_at,
        }
    }
}

/// Build the public URL for `share_id` under `base_url`.
///
/// # Returns
/// `base_url` without trailing slashes, then `/`, then `share_id`.
pub fn share_url(base_url: &str, share_id: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), share_id)
}
