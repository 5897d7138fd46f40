//! SnipShare: local snippet storage with publish-and-fetch sharing over HTTP.
//!
//! Facade over the workspace crates for callers that want one dependency.

pub use snipshare_client as client;
pub use snipshare_server as server;
pub use snipshare_core::{config, models};

pub use snipshare_client::{ClientError, ShareClient};
pub use snipshare_core::{AppError, Config, ShareRegistry, SnippetStore};
