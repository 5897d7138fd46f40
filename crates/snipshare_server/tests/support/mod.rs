//! Shared integration-test server bootstrap helpers.

use axum_test::TestServer;
use snipshare_core::ManualClock;
use snipshare_server::{create_app, AppState, Config, ShareRegistry};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub(crate) const TEST_BASE_URL: &str = "http://share.test/api/snippets";

pub(crate) fn test_config_for_db_path(db_path: &Path) -> Config {
    Config {
        snippets_db_path: String::new(),
        registry_db_path: db_path.to_str().expect("db path").to_string(),
        port: 0,
        share_base_url: TEST_BASE_URL.to_string(),
        max_snippet_size: 64 * 1024,
        reap_interval_secs: 0,
        share_server: String::new(),
        share_timeout_secs: 10,
    }
}

pub(crate) fn test_server_for_config(config: Config) -> (TestServer, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let registry = ShareRegistry::open(&config.registry_db_path, &config.share_base_url)
        .expect("open registry")
        .with_clock(clock.clone());
    let state = AppState::new(config, registry);
    let app = create_app(state, false);
    let server = TestServer::new(app).expect("server");
    (server, clock)
}

pub(crate) fn setup_test_server() -> (TestServer, Arc<ManualClock>, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("registry.redb");
    let config = test_config_for_db_path(&db_path);
    let (server, clock) = test_server_for_config(config);
    (server, clock, temp_dir)
}
