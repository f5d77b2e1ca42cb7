//! Catalog reads. These endpoints are public and never touch the session.

use lifeguide_types::{Category, CategoryDetail, SearchResults, TopicDetail, VideoResults};

use super::client::{ApiClient, decode, resource_path};
use super::errors::ApiError;
use crate::cache::{CacheStore, Loaded, fetch_through, keys};

impl ApiClient {
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let payload = self.get_public("/categories", &[]).await?;
        decode("categories", &payload)
    }

    pub async fn category(&self, slug: &str) -> Result<CategoryDetail, ApiError> {
        let path = resource_path("/categories", slug)?;
        let payload = self.get_public(&path, &[]).await?;
        decode("category detail", &payload)
    }

    /// Topic detail through the offline cache (`topic_{id}`).
    pub async fn topic(&self, cache: &dyn CacheStore, topic_id: &str) -> Loaded<TopicDetail> {
        let path = match resource_path("/topics", topic_id) {
            Ok(path) => path,
            Err(error) => return Loaded::Empty { error },
        };
        fetch_through(
            cache,
            &keys::topic_key(topic_id),
            "topic detail",
            self.get_public(&path, &[]),
        )
        .await
    }

    /// Full-text topic search. Queries shorter than `min_len` characters
    /// return no results without a request, matching the server's own cutoff.
    pub async fn search(&self, query: &str, min_len: usize) -> Result<SearchResults, ApiError> {
        let query = query.trim();
        if query.chars().count() < min_len {
            return Ok(SearchResults::default());
        }
        let payload = self.get_public("/search", &[("q", query)]).await?;
        decode("search results", &payload)
    }

    /// Free-form video search.
    pub async fn videos(&self, query: &str) -> Result<VideoResults, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(VideoResults::default());
        }
        let payload = self.get_public("/videos/search", &[("q", query)]).await?;
        decode("video results", &payload)
    }
}
