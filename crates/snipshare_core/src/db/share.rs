//! Share registry: public identifier allocation and lazy expiry.

use super::tables::SHARED_SNIPPETS;
use crate::clock::{Clock, SystemClock};
use crate::constants::MAX_SHARE_ID_ATTEMPTS;
use crate::error::AppError;
use crate::models::share::{share_url, ShareReceipt, SharedSnippet, SharedSnippetContent};
use crate::models::snippet::{normalize_language, require_non_blank};
use crate::share_id::{is_valid_share_id, RandomShareIds, ShareIdGenerator};
use chrono::{DateTime, Duration, Utc};
use redb::{ReadableDatabase, ReadableTable, ReadableTableMetadata};
use std::sync::Arc;

enum InsertOutcome {
    Inserted,
    Collision,
}

/// Server-side store of published snippets.
///
/// Safe to share across request handlers behind an `Arc`. redb serializes
/// write transactions, so the uniqueness check and insert in [`Self::publish`]
/// cannot interleave with another publish.
pub struct ShareRegistry {
    db: Arc<redb::Database>,
    base_url: String,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn ShareIdGenerator>,
}

fn ttl_to_duration(ttl_days: u32) -> Result<Duration, AppError> {
    if ttl_days == 0 {
        return Err(AppError::Validation(
            "expires_in_days must be at least 1".to_string(),
        ));
    }
    Duration::try_days(i64::from(ttl_days))
        .ok_or_else(|| AppError::Validation("expires_in_days is too large".to_string()))
}

impl ShareRegistry {
    /// Open or create the registry at `path`.
    ///
    /// # Arguments
    /// - `path`: Database file path.
    /// - `base_url`: Prefix joined with each share id to build its URL.
    ///
    /// # Errors
    /// Returns an error when the file cannot be opened or the table cannot be initialized.
    pub fn open(path: &str, base_url: &str) -> Result<Self, AppError> {
        let db = super::open_database(path)?;
        let write_txn = db.begin_write()?;
        write_txn.open_table(SHARED_SNIPPETS)?;
        write_txn.commit()?;
        Ok(Self {
            db,
            base_url: base_url.to_string(),
            clock: Arc::new(SystemClock),
            ids: Arc::new(RandomShareIds),
        })
    }

    /// Replace the time source used for creation and expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the candidate identifier source.
    pub fn with_id_generator(mut self, ids: Arc<dyn ShareIdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Base URL used for receipts.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Publish `content` under a freshly allocated share id.
    ///
    /// # Arguments
    /// - `content`: Body to publish; must be non-blank. Stored verbatim.
    /// - `language`: Optional tag, `"plaintext"` when absent or blank.
    /// - `ttl_days`: Days until expiry; `None` never expires.
    ///
    /// # Returns
    /// The share id, its URL, and the expiry timestamp if any.
    ///
    /// # Errors
    /// Returns [`AppError::Validation`] for blank content, zero TTL, or a TTL
    /// past the representable calendar; [`AppError::ShareIdExhausted`] when
    /// every draw collided; storage errors otherwise.
    pub fn publish(
        &self,
        content: &str,
        language: Option<&str>,
        ttl_days: Option<u32>,
    ) -> Result<ShareReceipt, AppError> {
        require_non_blank("Content", content)?;
        let ttl = ttl_days.map(ttl_to_duration).transpose()?;
        let created_at = self.clock.now();
        let expires_at = match ttl {
            Some(ttl) => Some(created_at.checked_add_signed(ttl).ok_or_else(|| {
                AppError::Validation("expires_in_days is too large".to_string())
            })?),
            None => None,
        };
        let language = normalize_language(language);

        for attempt in 1..=MAX_SHARE_ID_ATTEMPTS {
            let row = SharedSnippet {
                share_id: self.ids.generate(),
                content: content.to_string(),
                language: language.clone(),
                created_at,
                expires_at,
            };
            match self.insert_if_absent(&row)? {
                InsertOutcome::Inserted => {
                    tracing::info!(
                        "Published share {} (expires: {})",
                        row.share_id,
                        row.expires_at
                            .map(|at| at.to_rfc3339())
                            .unwrap_or_else(|| "never".to_string())
                    );
                    return Ok(ShareReceipt {
                        url: share_url(&self.base_url, &row.share_id),
                        share_id: row.share_id,
                        expires_at,
                    });
                }
                InsertOutcome::Collision => {
                    tracing::debug!(
                        "Share id {} already taken (attempt {}); redrawing",
                        row.share_id,
                        attempt
                    );
                }
            }
        }

        tracing::error!(
            "Gave up allocating a share id after {} attempts",
            MAX_SHARE_ID_ATTEMPTS
        );
        Err(AppError::ShareIdExhausted {
            attempts: MAX_SHARE_ID_ATTEMPTS,
        })
    }

    fn insert_if_absent(&self, row: &SharedSnippet) -> Result<InsertOutcome, AppError> {
        let encoded = bincode::serialize(row)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SHARED_SNIPPETS)?;
            if table.get(row.share_id.as_str())?.is_some() {
                // Dropping the transaction aborts it.
                return Ok(InsertOutcome::Collision);
            }
            table.insert(row.share_id.as_str(), encoded.as_slice())?;
        }
        write_txn.commit()?;
        Ok(InsertOutcome::Inserted)
    }

    /// Fetch a published snippet.
    ///
    /// A row whose expiry is strictly in the past is deleted as part of this
    /// call and reported as missing.
    ///
    /// # Returns
    /// `Ok(Some(content))` while live, `Ok(None)` when absent or expired.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn fetch(&self, share_id: &str) -> Result<Option<SharedSnippetContent>, AppError> {
        if !is_valid_share_id(share_id) {
            return Ok(None);
        }

        let row = {
            let read_txn = self.db.begin_read()?;
            let table = read_txn.open_table(SHARED_SNIPPETS)?;
            let found = table.get(share_id)?;
            match found {
                Some(value) => Some(bincode::deserialize::<SharedSnippet>(value.value())?),
                None => None,
            }
        };
        let Some(row) = row else {
            return Ok(None);
        };

        let now = self.clock.now();
        if !row.is_expired_at(now) {
            return Ok(Some(row.into()));
        }

        if self.remove_if_expired(share_id, now)? {
            tracing::info!("Share {} expired; purged on read", share_id);
        }
        Ok(None)
    }

    /// Delete `share_id` if it is still present and expired at `now`.
    ///
    /// Re-reads inside the write transaction so a concurrent purge (row gone)
    /// is not an error.
    fn remove_if_expired(&self, share_id: &str, now: DateTime<Utc>) -> Result<bool, AppError> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(SHARED_SNIPPETS)?;
            let expired = match table.get(share_id)? {
                Some(value) => {
                    bincode::deserialize::<SharedSnippet>(value.value())?.is_expired_at(now)
                }
                None => false,
            };
            if expired {
                table.remove(share_id)?;
            }
            expired
        };
        write_txn.commit()?;
        Ok(removed)
    }

    /// Delete every row whose expiry is in the past.
    ///
    /// Independent of [`Self::fetch`]; used by the optional periodic reaper.
    ///
    /// # Returns
    /// Number of rows removed.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn purge_expired(&self) -> Result<usize, AppError> {
        let now = self.clock.now();
        let write_txn = self.db.begin_write()?;
        let purged = {
            let mut table = write_txn.open_table(SHARED_SNIPPETS)?;
            let mut expired_ids = Vec::new();
            for item in table.iter()? {
                let (key, value) = item?;
                let row: SharedSnippet = bincode::deserialize(value.value())?;
                if row.is_expired_at(now) {
                    expired_ids.push(key.value().to_string());
                }
            }
            for share_id in &expired_ids {
                table.remove(share_id.as_str())?;
            }
            expired_ids.len()
        };
        write_txn.commit()?;

        if purged > 0 {
            tracing::info!("Purged {} expired share(s)", purged);
        }
        Ok(purged)
    }

    /// Number of rows currently stored, live or expired-but-unpurged.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn stored_count(&self) -> Result<u64, AppError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SHARED_SNIPPETS)?;
        Ok(table.len()?)
    }
}
