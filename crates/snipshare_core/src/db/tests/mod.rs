//! Database integration tests.

use crate::clock::Clock;
use crate::error::AppError;
use crate::models::snippet::SnippetSummary;
use crate::test_support::{
    setup_temp_registry, setup_temp_store, ScriptedShareIds, TEST_BASE_URL,
};
use chrono::Duration;
use std::sync::{Arc, Barrier};
use std::thread;

fn ids_of(list: &[SnippetSummary]) -> Vec<u64> {
    list.iter().map(|summary| summary.id).collect()
}

mod concurrency;
