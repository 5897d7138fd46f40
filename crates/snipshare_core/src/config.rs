//! Configuration loading from environment variables.

use crate::constants::{
    DATA_DIR_NAME, DEFAULT_MAX_SNIPPET_SIZE, DEFAULT_PORT, DEFAULT_SHARE_SERVER_URL,
    DEFAULT_SHARE_TIMEOUT_SECS, REGISTRY_DB_FILE_NAME, SHARE_API_PATH, SNIPPETS_DB_FILE_NAME,
};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Runtime configuration for SnipShare binaries.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Local snippet store file.
    pub snippets_db_path: String,
    /// Share registry store file (server side).
    pub registry_db_path: String,
    pub port: u16,
    /// Prefix joined with a share id to form its public URL.
    pub share_base_url: String,
    pub max_snippet_size: usize,
    /// Seconds between expiry sweeps; `0` disables the reaper.
    pub reap_interval_secs: u64,
    /// Share server targeted by the client.
    pub share_server: String,
    pub share_timeout_secs: u64,
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    std::env::current_dir().ok()
}

fn default_data_dir() -> PathBuf {
    let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".cache").join(DATA_DIR_NAME)
}

fn db_path_from_env(name: &str, file_name: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(expand_tilde)
        .unwrap_or_else(|| {
            default_data_dir()
                .join(file_name)
                .to_string_lossy()
                .to_string()
        })
}

fn parsed_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|raw| raw.trim().parse().ok())
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Build the default share base URL served by a local server on `port`.
///
/// # Returns
/// `http://127.0.0.1:{port}/api/snippets`.
pub fn default_share_base_url(port: u16) -> String {
    format!("http://127.0.0.1:{}{}", port, SHARE_API_PATH)
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
///
/// # Arguments
/// - `name`: Environment variable name.
///
/// # Returns
/// `true` when the value is a recognized truthy value.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        let port = parsed_env("PORT").unwrap_or(DEFAULT_PORT);
        Self {
            snippets_db_path: db_path_from_env("SNIPPETS_DB_PATH", SNIPPETS_DB_FILE_NAME),
            registry_db_path: db_path_from_env("REGISTRY_DB_PATH", REGISTRY_DB_FILE_NAME),
            port,
            share_base_url: non_empty_env("SHARE_BASE_URL")
                .unwrap_or_else(|| default_share_base_url(port)),
            max_snippet_size: parsed_env("MAX_SNIPPET_SIZE").unwrap_or(DEFAULT_MAX_SNIPPET_SIZE),
            reap_interval_secs: parsed_env("REAP_INTERVAL_SECS").unwrap_or(0),
            share_server: non_empty_env("SHARE_SERVER")
                .unwrap_or_else(|| DEFAULT_SHARE_SERVER_URL.to_string()),
            share_timeout_secs: parsed_env("SHARE_TIMEOUT_SECS")
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_SHARE_TIMEOUT_SECS),
        }
    }
}
