//! redb table definitions shared by storage modules.

use redb::TableDefinition;

/// Canonical snippet rows (`Snippet`, bincode-encoded).
pub const SNIPPETS: TableDefinition<u64, &[u8]> = TableDefinition::new("snippets");
/// Snippet list rows (`SnippetSummary`, bincode-encoded).
pub const SNIPPETS_META: TableDefinition<u64, &[u8]> = TableDefinition::new("snippets_meta");
/// Recency index ordered by reverse-nanos then reverse-id.
pub const SNIPPETS_BY_UPDATED: TableDefinition<(u64, u64), ()> =
    TableDefinition::new("snippets_by_updated");
/// Id allocator; holds [`NEXT_SNIPPET_ID_KEY`] only.
pub const SNIPPET_SEQ: TableDefinition<&str, u64> = TableDefinition::new("snippet_seq");
/// Key of the next unassigned snippet id in [`SNIPPET_SEQ`].
pub const NEXT_SNIPPET_ID_KEY: &str = "next_id";

/// Published snippet rows keyed by share id (`SharedSnippet`, bincode-encoded).
pub const SHARED_SNIPPETS: TableDefinition<&str, &[u8]> = TableDefinition::new("shared_snippets");
