//! Content store backends.
//!
//! `build(config)` is the factory: called at startup.
//! Enum dispatch keeps callers free of trait objects; adding a backend means
//! a new module, a new variant and a new `query` arm.

pub mod sanity;
pub mod snapshot;

use serde_json::Value;
use tracing::info;

use crate::config::ContentConfig;
use crate::content::{ContentError, Query};

#[derive(Debug, Clone)]
pub enum ContentSource {
    /// Remote query API.
    Sanity(sanity::SanityProvider),
    /// Local JSON snapshot evaluated in memory.
    Snapshot(snapshot::SnapshotProvider),
}

impl ContentSource {
    /// Run `query` and return the raw `result` value.
    pub async fn query(&self, query: &Query) -> Result<Value, ContentError> {
        match self {
            ContentSource::Sanity(p) => p.query(query).await,
            ContentSource::Snapshot(p) => p.query(query).await,
        }
    }
}

/// Pick the backend for `config`. A snapshot wins over the remote store so a
/// developer can work offline with credentials still in `.env`.
pub fn build(config: &ContentConfig) -> Result<Option<ContentSource>, ContentError> {
    if let Some(path) = &config.snapshot {
        let provider = snapshot::SnapshotProvider::load(path)?;
        info!(path = %path.display(), "content: serving from local snapshot");
        return Ok(Some(ContentSource::Snapshot(provider)));
    }

    match &config.project_id {
        Some(project_id) => {
            let provider = sanity::SanityProvider::new(
                project_id,
                &config.dataset,
                &config.api_version,
                config.use_cdn,
                config.timeout_seconds,
            )?;
            info!(%project_id, dataset = %config.dataset, use_cdn = config.use_cdn, "content: remote store configured");
            Ok(Some(ContentSource::Sanity(provider)))
        }
        None => {
            info!("content: no project id; pages render placeholder content");
            Ok(None)
        }
    }
}
