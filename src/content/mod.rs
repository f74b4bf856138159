//! Content client: read-only access to the headless content store.
//!
//! [`ContentClient::fetch`] returns `Ok(None)` when no store is configured.
//! That is a normal state (pages render their empty/placeholder variant),
//! not an error. Transport and decoding failures propagate as
//! [`ContentError`]; callers decide whether to degrade or fail the page.
//!
//! Backends live in [`providers`] and are selected once at startup.

pub mod image;
pub mod providers;
pub mod queries;
pub mod types;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ContentConfig;

pub use image::{Fit, Format, ImageUrl, ImageUrlBuilder};
pub use providers::ContentSource;
pub use queries::Query;
pub use types::{Event, Image, NewsPost, Person, Project};

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content request failed: {0}")]
    Request(String),
    #[error("content store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected content shape: {0}")]
    Decode(String),
    #[error("content snapshot unavailable: {0}")]
    Snapshot(String),
}

// ── Client ────────────────────────────────────────────────────────────────────

/// Shared, cheaply cloneable handle to the content store.
#[derive(Debug, Clone, Default)]
pub struct ContentClient {
    source: Option<ContentSource>,
    images: Option<ImageUrlBuilder>,
}

impl ContentClient {
    /// Build from config. No project id and no snapshot → unconfigured client.
    pub fn from_config(config: &ContentConfig) -> Result<Self, ContentError> {
        let source = providers::build(config)?;
        let images = config
            .project_id
            .as_ref()
            .map(|project| ImageUrlBuilder::new(project.clone(), config.dataset.clone()));
        Ok(Self { source, images })
    }

    /// A client whose every fetch yields the "not configured" sentinel.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn new(source: ContentSource, images: Option<ImageUrlBuilder>) -> Self {
        Self { source: Some(source), images }
    }

    pub fn is_configured(&self) -> bool {
        self.source.is_some()
    }

    /// Run `query` and decode its result as `T`.
    ///
    /// `Ok(None)` means the store is not configured. Single-record queries
    /// should decode into `Option<Record>`: a `null` result is "not found".
    pub async fn fetch<T: DeserializeOwned>(&self, query: &Query) -> Result<Option<T>, ContentError> {
        let Some(source) = &self.source else {
            debug!(query = query.name(), "content store not configured");
            return Ok(None);
        };

        let value = source.query(query).await.inspect_err(|e| {
            warn!(query = query.name(), error = %e, "content fetch failed");
        })?;

        serde_json::from_value(value).map(Some).map_err(|e| {
            warn!(query = query.name(), error = %e, "content result did not match projection");
            ContentError::Decode(format!("{}: {e}", query.name()))
        })
    }

    /// List query; the unconfigured store reads as an empty list.
    pub async fn fetch_list<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>, ContentError> {
        if query.is_single() {
            return Err(ContentError::Decode(format!("{} yields one record, not a list", query.name())));
        }
        Ok(self.fetch::<Vec<T>>(query).await?.unwrap_or_default())
    }

    /// Single-record query; unconfigured and not-found both read as `None`.
    pub async fn fetch_one<T: DeserializeOwned>(&self, query: &Query) -> Result<Option<T>, ContentError> {
        if !query.is_single() {
            return Err(ContentError::Decode(format!("{} yields a list, not one record", query.name())));
        }
        Ok(self.fetch::<Option<T>>(query).await?.flatten())
    }

    /// Start an image rendition. `None` when the store is not configured or
    /// there is no image; [`ImageUrl::url`] is `None` when the asset is missing.
    pub fn image<'a>(&'a self, image: Option<&'a Image>) -> Option<ImageUrl<'a>> {
        Some(self.images.as_ref()?.image(image?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::providers::snapshot::SnapshotProvider;
    use serde_json::json;

    fn snapshot_client() -> ContentClient {
        let snapshot = SnapshotProvider::from_value(json!({
            "people": [
                { "_id": "p1", "name": "Ada", "slug": { "current": "ada" } }
            ]
        }))
        .unwrap();
        ContentClient::new(ContentSource::Snapshot(snapshot), None)
    }

    #[tokio::test]
    async fn unconfigured_fetch_is_none() {
        let client = ContentClient::unconfigured();
        assert!(!client.is_configured());
        let people: Option<Vec<Person>> = client.fetch(&Query::AllPeople).await.unwrap();
        assert!(people.is_none());
        let list: Vec<Person> = client.fetch_list(&Query::AllPeople).await.unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn query_shape_must_match_fetch() {
        let client = snapshot_client();
        let one = client.fetch_one::<Person>(&Query::AllPeople).await;
        assert!(matches!(one, Err(ContentError::Decode(_))), "{one:?}");
        let list = client.fetch_list::<Person>(&Query::PersonBySlug { slug: "ada".into() }).await;
        assert!(matches!(list, Err(ContentError::Decode(_))), "{list:?}");
    }

    #[tokio::test]
    async fn fetch_one_distinguishes_found_and_missing() {
        let client = snapshot_client();
        let found: Option<Person> = client
            .fetch_one(&Query::PersonBySlug { slug: "ada".into() })
            .await
            .unwrap();
        assert_eq!(found.map(|p| p.name), Some("Ada".to_string()));

        let missing: Option<Option<Person>> = client
            .fetch(&Query::PersonBySlug { slug: "nobody".into() })
            .await
            .unwrap();
        assert_eq!(missing, Some(None));
    }

    #[tokio::test]
    async fn shape_mismatch_is_decode_error() {
        let client = snapshot_client();
        let err = client.fetch::<Vec<Project>>(&Query::AllPeople).await.unwrap_err();
        assert!(matches!(err, ContentError::Decode(_)));
    }

    #[test]
    fn image_requires_configured_builder() {
        let img = Image::default();
        assert!(ContentClient::unconfigured().image(Some(&img)).is_none());

        let client = ContentClient::new(
            ContentSource::Snapshot(SnapshotProvider::empty()),
            Some(ImageUrlBuilder::new("proj", "production")),
        );
        assert!(client.image(None).is_none());
        let rendition = client.image(Some(&img)).unwrap();
        assert_eq!(rendition.url(), None);
    }
}
