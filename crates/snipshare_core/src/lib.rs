//! Core domain library for SnipShare (config, storage, models).

/// Time sources used for timestamps and expiry checks.
pub mod clock;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across SnipShare crates.
pub mod constants;
/// Local snippet store and share registry backed by redb.
pub mod db;
/// Process-global environment mutation helpers.
pub mod env;
/// Application error types (storage/domain).
pub mod error;
/// Data models for persistence and the share wire format.
pub mod models;
/// Public share identifier generation.
pub mod share_id;

#[cfg(test)]
pub(crate) mod test_support;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use constants::*;
pub use db::{share::ShareRegistry, snippet::SnippetStore};
pub use error::AppError;
