//! Local snippet storage backed by redb.

use super::tables::{
    NEXT_SNIPPET_ID_KEY, SNIPPETS, SNIPPETS_BY_UPDATED, SNIPPETS_META, SNIPPET_SEQ,
};
use super::time_util::recency_key;
use crate::clock::{Clock, SystemClock};
use crate::error::AppError;
use crate::models::snippet::{normalize_language, require_non_blank, Snippet, SnippetSummary};
use redb::{ReadableDatabase, ReadableTable};
use std::sync::Arc;

/// Private snippet store.
///
/// Every mutation runs in a single redb write transaction, so each create,
/// update, or delete is either fully applied or not visible at all.
pub struct SnippetStore {
    db: Arc<redb::Database>,
    clock: Arc<dyn Clock>,
}

fn encode_row(snippet: &Snippet) -> Result<(Vec<u8>, Vec<u8>), AppError> {
    let row = bincode::serialize(snippet)?;
    let meta = bincode::serialize(&SnippetSummary::from(snippet))?;
    Ok((row, meta))
}

impl SnippetStore {
    /// Open or create the store at `path`.
    ///
    /// # Returns
    /// A store stamping records with the system clock.
    ///
    /// # Errors
    /// Returns an error when the file cannot be opened or tables cannot be initialized.
    pub fn open(path: &str) -> Result<Self, AppError> {
        let db = super::open_database(path)?;
        let write_txn = db.begin_write()?;
        write_txn.open_table(SNIPPETS)?;
        write_txn.open_table(SNIPPETS_META)?;
        write_txn.open_table(SNIPPETS_BY_UPDATED)?;
        write_txn.open_table(SNIPPET_SEQ)?;
        write_txn.commit()?;
        Ok(Self {
            db,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the time source used for `created_at`/`updated_at`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Insert a new snippet.
    ///
    /// # Arguments
    /// - `title`: Display title; must be non-blank.
    /// - `content`: Snippet body; must be non-blank.
    /// - `language`: Optional tag, `"plaintext"` when absent or blank.
    ///
    /// # Returns
    /// The newly assigned id. Ids are never reused, even after deletion.
    ///
    /// # Errors
    /// Returns [`AppError::Validation`] before touching storage when title or
    /// content is blank, or a storage error when the write fails.
    pub fn create(
        &self,
        title: &str,
        content: &str,
        language: Option<&str>,
    ) -> Result<u64, AppError> {
        require_non_blank("Title", title)?;
        require_non_blank("Content", content)?;
        let language = normalize_language(language);
        let now = self.clock.now();

        let write_txn = self.db.begin_write()?;
        let id = {
            let mut seq = write_txn.open_table(SNIPPET_SEQ)?;
            let mut snippets = write_txn.open_table(SNIPPETS)?;
            let mut metas = write_txn.open_table(SNIPPETS_META)?;
            let mut updated = write_txn.open_table(SNIPPETS_BY_UPDATED)?;

            let id = seq
                .get(NEXT_SNIPPET_ID_KEY)?
                .map(|guard| guard.value())
                .unwrap_or(1);
            let next = id.checked_add(1).ok_or_else(|| {
                AppError::StorageMessage("Snippet id counter overflowed".to_string())
            })?;

            let snippet = Snippet {
                id,
                title: title.to_string(),
                language,
                content: content.to_string(),
                created_at: now,
                updated_at: now,
            };
            let (row, meta) = encode_row(&snippet)?;

            seq.insert(NEXT_SNIPPET_ID_KEY, next)?;
            snippets.insert(id, row.as_slice())?;
            metas.insert(id, meta.as_slice())?;
            updated.insert(recency_key(now, id), ())?;
            id
        };
        write_txn.commit()?;

        tracing::debug!("Created snippet {}", id);
        Ok(id)
    }

    /// Fetch a snippet by id.
    ///
    /// # Returns
    /// `Ok(Some(snippet))` when found, `Ok(None)` when missing.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn get(&self, id: u64) -> Result<Option<Snippet>, AppError> {
        let read_txn = self.db.begin_read()?;
        let snippets = read_txn.open_table(SNIPPETS)?;
        match snippets.get(id)? {
            Some(value) => Ok(Some(bincode::deserialize(value.value())?)),
            None => Ok(None),
        }
    }

    /// Replace title, content, and language of an existing snippet.
    ///
    /// `updated_at` becomes `max(now, previous updated_at)`; `created_at` is kept.
    ///
    /// # Returns
    /// The updated snippet.
    ///
    /// # Errors
    /// Returns [`AppError::Validation`] on blank title/content (nothing is
    /// written), [`AppError::NotFound`] when `id` is absent, or a storage error.
    pub fn update(
        &self,
        id: u64,
        title: &str,
        content: &str,
        language: Option<&str>,
    ) -> Result<Snippet, AppError> {
        require_non_blank("Title", title)?;
        require_non_blank("Content", content)?;
        let language = normalize_language(language);
        let now = self.clock.now();

        let write_txn = self.db.begin_write()?;
        let snippet = {
            let mut snippets = write_txn.open_table(SNIPPETS)?;
            let mut metas = write_txn.open_table(SNIPPETS_META)?;
            let mut updated = write_txn.open_table(SNIPPETS_BY_UPDATED)?;

            let Some(old_guard) = snippets.get(id)? else {
                return Err(AppError::NotFound);
            };
            let mut snippet: Snippet = bincode::deserialize(old_guard.value())?;
            drop(old_guard);
            let old_key = recency_key(snippet.updated_at, id);

            snippet.title = title.to_string();
            snippet.content = content.to_string();
            snippet.language = language;
            snippet.updated_at = now.max(snippet.updated_at);

            let (row, meta) = encode_row(&snippet)?;
            let new_key = recency_key(snippet.updated_at, id);

            snippets.insert(id, row.as_slice())?;
            metas.insert(id, meta.as_slice())?;
            if old_key != new_key {
                let _ = updated.remove(old_key)?;
            }
            updated.insert(new_key, ())?;
            snippet
        };
        write_txn.commit()?;

        Ok(snippet)
    }

    /// Delete a snippet.
    ///
    /// Deleting an absent id is a successful no-op.
    ///
    /// # Returns
    /// `true` when a row was removed, `false` when none existed.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn delete(&self, id: u64) -> Result<bool, AppError> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut snippets = write_txn.open_table(SNIPPETS)?;
            let mut metas = write_txn.open_table(SNIPPETS_META)?;
            let mut updated = write_txn.open_table(SNIPPETS_BY_UPDATED)?;

            let old = snippets
                .remove(id)?
                .map(|guard| bincode::deserialize::<Snippet>(guard.value()))
                .transpose()?;
            match old {
                Some(snippet) => {
                    let _ = metas.remove(id)?;
                    let _ = updated.remove(recency_key(snippet.updated_at, id))?;
                    true
                }
                None => false,
            }
        };
        write_txn.commit()?;

        if removed {
            tracing::debug!("Deleted snippet {}", id);
        }
        Ok(removed)
    }

    /// List all snippets, most recently updated first (ties: higher id first).
    ///
    /// # Returns
    /// A snapshot taken from one read transaction.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn list(&self) -> Result<Vec<SnippetSummary>, AppError> {
        let read_txn = self.db.begin_read()?;
        let updated_table = read_txn.open_table(SNIPPETS_BY_UPDATED)?;
        let meta_table = read_txn.open_table(SNIPPETS_META)?;

        let mut summaries = Vec::new();
        for item in updated_table.iter()? {
            let (key, _) = item?;
            let (_, reverse_id) = key.value();
            let Some(meta_guard) = meta_table.get(u64::MAX - reverse_id)? else {
                continue;
            };
            summaries.push(bincode::deserialize(meta_guard.value())?);
        }

        Ok(summaries)
    }
}
