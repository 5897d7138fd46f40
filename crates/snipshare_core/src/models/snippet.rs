//! Local snippet records.

use crate::{constants::DEFAULT_LANGUAGE, error::AppError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A private snippet stored in the local store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snippet {
    pub id: u64,
    pub title: String,
    pub language: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List projection of a [`Snippet`] (no content).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnippetSummary {
    pub id: u64,
    pub title: String,
    pub language: String,
    pub updated_at: DateTime<Utc>,
}

impl From<&Snippet> for SnippetSummary {
    fn from(value: &Snippet) -> Self {
        Self {
            id: value.id,
            title: value.title.clone(),
            language: value.language.clone(),
            updated_at: value.updated_at,
        }
    }
}

/// Resolve an optional caller-supplied language tag.
///
/// Language is an opaque tag: anything non-blank is kept verbatim (trimmed).
///
/// # Returns
/// The trimmed tag, or [`DEFAULT_LANGUAGE`] when absent or blank.
pub fn normalize_language(language: Option<&str>) -> String {
    language
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_string()
}

/// Reject a required text field that is empty after trimming.
///
/// # Errors
/// Returns [`AppError::Validation`] naming `field` when `value` is blank.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}
