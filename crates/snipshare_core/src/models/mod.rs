//! Data models for persistence and the share wire format.

/// Shared snippet rows and publish/fetch payloads.
pub mod share;
/// Local snippet records.
pub mod snippet;

#[cfg(test)]
mod tests;
