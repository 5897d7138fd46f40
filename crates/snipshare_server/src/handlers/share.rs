//! Shared snippet HTTP handlers.

use super::normalize::{normalize_optional_text, ttl_days_for_publish};
use crate::{error::HttpError, AppError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use snipshare_core::models::share::{PublishRequest, ShareReceipt, SharedSnippetContent};

/// Publish a snippet under a fresh share id.
///
/// # Arguments
/// - `state`: Application state.
/// - `req`: Publish payload.
///
/// # Returns
/// `201 Created` with the share id, URL, and optional expiry.
///
/// # Errors
/// Returns 400 for blank or oversize content and `expires_in_days < 1`;
/// storage faults map to 500.
pub async fn publish_snippet(
    State(state): State<AppState>,
    Json(req): Json<PublishRequest>,
) -> Result<(StatusCode, Json<ShareReceipt>), HttpError> {
    if req.content.len() > state.config.max_snippet_size {
        return Err(AppError::Validation(format!(
            "Snippet size exceeds maximum of {} bytes",
            state.config.max_snippet_size
        ))
        .into());
    }

    let ttl_days = ttl_days_for_publish(req.expires_in_days)?;
    let language = normalize_optional_text(req.language);
    let receipt = state
        .registry
        .publish(&req.content, language.as_deref(), ttl_days)?;

    Ok((StatusCode::CREATED, Json(receipt)))
}

/// Fetch a published snippet by share id.
///
/// # Returns
/// The snippet content as JSON.
///
/// # Errors
/// Returns 404 with an empty body when the id is unknown or expired.
pub async fn fetch_snippet(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
) -> Result<Json<SharedSnippetContent>, HttpError> {
    state
        .registry
        .fetch(&share_id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound.into())
}
