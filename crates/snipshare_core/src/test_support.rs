//! Shared test-only helpers for snipshare_core.

use crate::clock::ManualClock;
use crate::share_id::ShareIdGenerator;
use crate::{ShareRegistry, SnippetStore};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub(crate) const TEST_BASE_URL: &str = "http://share.test/api/snippets";

/// Creates an isolated snippet store driven by a manual clock.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing file.
///
/// # Panics
/// Panics if temp-dir creation or store initialization fails.
pub(crate) fn setup_temp_store() -> (SnippetStore, Arc<ManualClock>, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let path = temp_dir.path().join("snippets.redb");
    let clock = Arc::new(ManualClock::default());
    let store = SnippetStore::open(path.to_str().expect("db path"))
        .expect("store")
        .with_clock(clock.clone());
    (store, clock, temp_dir)
}

/// Creates an isolated share registry driven by a manual clock.
///
/// # Panics
/// Panics if temp-dir creation or registry initialization fails.
pub(crate) fn setup_temp_registry() -> (ShareRegistry, Arc<ManualClock>, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let path = temp_dir.path().join("registry.redb");
    let clock = Arc::new(ManualClock::default());
    let registry = ShareRegistry::open(path.to_str().expect("db path"), TEST_BASE_URL)
        .expect("registry")
        .with_clock(clock.clone());
    (registry, clock, temp_dir)
}

/// Yields a fixed script of ids, repeating the last one once exhausted.
pub(crate) struct ScriptedShareIds {
    script: Mutex<VecDeque<String>>,
    last: Mutex<String>,
}

impl ScriptedShareIds {
    pub(crate) fn new(ids: &[&str]) -> Self {
        Self {
            script: Mutex::new(ids.iter().map(|id| id.to_string()).collect()),
            last: Mutex::new(ids.last().copied().unwrap_or("AAAAAAAA").to_string()),
        }
    }
}

impl ShareIdGenerator for ScriptedShareIds {
    fn generate(&self) -> String {
        let next = self.script.lock().expect("script lock").pop_front();
        match next {
            Some(id) => {
                *self.last.lock().expect("last lock") = id.clone();
                id
            }
            None => self.last.lock().expect("last lock").clone(),
        }
    }
}
