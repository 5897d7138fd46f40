//! redb-backed stores for SnipShare.
//!
//! The local snippet store and the share registry live in separate database
//! files with disjoint identifier spaces.

/// Share registry (public ids, expiry).
pub mod share;
/// Local snippet store.
pub mod snippet;
/// redb table definitions.
pub mod tables;
pub(crate) mod time_util;

use crate::error::AppError;
use std::path::Path;
use std::sync::Arc;

/// Open (or create) a redb database file, creating its parent directory.
///
/// # Arguments
/// - `path`: Database file path.
///
/// # Returns
/// A shared handle to the opened database.
///
/// # Errors
/// Returns [`AppError::StorageMessage`] when the directory cannot be created or
/// another process holds the file, and [`AppError::Database`] for other redb
/// failures.
pub(crate) fn open_database(path: &str) -> Result<Arc<redb::Database>, AppError> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|err| {
                AppError::StorageMessage(format!(
                    "Failed to create database directory '{}': {}",
                    parent.display(),
                    err
                ))
            })?;
        }
    }

    match redb::Database::create(path) {
        Ok(db) => Ok(Arc::new(db)),
        Err(redb::DatabaseError::DatabaseAlreadyOpen) => Err(AppError::StorageMessage(format!(
            "Database '{}' is already open in another process.\n\
            Close the other instance first, or point the path variable at a different file.",
            path
        ))),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests;
