//! Shared constants used across SnipShare crates.

/// Default API port for the share server.
pub const DEFAULT_PORT: u16 = 38412;

/// Default maximum snippet size accepted by the share API.
pub const DEFAULT_MAX_SNIPPET_SIZE: usize = 10 * 1024 * 1024;

/// Default request timeout for share client calls, in seconds.
pub const DEFAULT_SHARE_TIMEOUT_SECS: u64 = 10;

/// Default base URL for CLI/API clients.
pub const DEFAULT_SHARE_SERVER_URL: &str = "http://127.0.0.1:38412";

/// Route prefix under which shared snippets are published and served.
pub const SHARE_API_PATH: &str = "/api/snippets";

/// Language tag applied when the caller does not supply one.
pub const DEFAULT_LANGUAGE: &str = "plaintext";

/// Length of a public share identifier.
pub const SHARE_ID_LEN: usize = 8;

/// Upper bound on identifier draws for one publish before giving up.
pub const MAX_SHARE_ID_ATTEMPTS: usize = 32;

/// Directory (under the user cache dir) holding both database files.
pub const DATA_DIR_NAME: &str = "snipshare";
/// File name of the local snippet store.
pub const SNIPPETS_DB_FILE_NAME: &str = "snippets.redb";
/// File name of the share registry store.
pub const REGISTRY_DB_FILE_NAME: &str = "registry.redb";
