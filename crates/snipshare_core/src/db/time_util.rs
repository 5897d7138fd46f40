//! Ordering keys derived from timestamps and ids.

use chrono::{DateTime, Utc};

/// Key that sorts newest-first, then highest-id-first, in ascending iteration.
pub(crate) fn recency_key(updated_at: DateTime<Utc>, id: u64) -> (u64, u64) {
    // Pre-epoch timestamps clamp to zero; post-2262 timestamps saturate.
    let nanos = updated_at.timestamp_nanos_opt().unwrap_or(i64::MAX).max(0) as u64;
    (u64::MAX - nanos, u64::MAX - id)
}
