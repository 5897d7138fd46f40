//! HTTP request handlers.

pub(crate) mod normalize;
/// Publish and fetch endpoints for shared snippets.
pub mod share;
