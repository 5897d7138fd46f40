//! Error type for share client calls.

use thiserror::Error;

/// Failure modes of a [`crate::ShareClient`] call.
///
/// `Transport` and `Status` are both transport-level failures from the
/// caller's point of view; neither is retried.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection failure, timeout, or an unreadable response body.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Server returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// A success response whose body did not match the wire format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rejected locally before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ClientError {
    /// Whether the failure happened on the way to or from the server.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}
