//! Bookmark synchronizer.
//!
//! Holds the client's projection of the user's server-side bookmarks. Only
//! `list`/`refresh` touch the offline cache; `add` and `remove` change the
//! in-memory list alone. An offline `remove` therefore leaves the cached set
//! diverged until the next successful `list`.

use std::sync::Arc;

use lifeguide_types::{Bookmark, BookmarkList, BookmarkRequest};
use reqwest::Method;

use crate::api::client::resource_path;
use crate::api::{ApiClient, ApiError, decode};
use crate::cache::{CacheStore, Loaded, fetch_through, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookmarkState {
    #[default]
    Unknown,
    /// Set by [`BookmarkSync::begin_refresh`] until the next list settles.
    Loading,
    /// Last list came from the server (and was cached).
    Loaded,
    /// Last list came from the offline cache.
    Offline,
}

pub struct BookmarkSync {
    api: ApiClient,
    cache: Arc<dyn CacheStore>,
    state: BookmarkState,
    items: Vec<Bookmark>,
    last_error: Option<ApiError>,
}

impl BookmarkSync {
    pub fn new(api: ApiClient, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            api,
            cache,
            state: BookmarkState::Unknown,
            items: Vec::new(),
            last_error: None,
        }
    }

    pub fn state(&self) -> BookmarkState {
        self.state
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.items
    }

    /// Error behind the current `Offline` state, if any.
    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    pub fn is_bookmarked(&self, topic_id: &str) -> bool {
        self.items.iter().any(|b| b.topic_id == topic_id)
    }

    /// Marks the set as loading so a view can render that state before it
    /// awaits [`list`](Self::list). The state stays `Loading` until `list`
    /// settles.
    pub fn begin_refresh(&mut self) {
        self.state = BookmarkState::Loading;
    }

    /// Fetches the bookmark set, falling back to the offline cache.
    ///
    /// Cached entries whose topic snapshot is missing are dropped. Returns the
    /// error that forced the fallback when nothing could be shown. `list`
    /// holds `&mut self` for the whole request, so callers that show
    /// `Loading` set it first with [`begin_refresh`](Self::begin_refresh).
    pub async fn list(&mut self) -> Result<&[Bookmark], ApiError> {
        let loaded: Loaded<BookmarkList> = fetch_through(
            self.cache.as_ref(),
            keys::BOOKMARKS_KEY,
            "bookmark list",
            self.api.authed(Method::GET, "/bookmarks", None),
        )
        .await;

        match loaded {
            Loaded::Live(list) => {
                self.items = list.bookmarks;
                self.state = BookmarkState::Loaded;
                self.last_error = None;
            }
            Loaded::Cached { value, error } => {
                tracing::info!(kind = %error.kind, "Showing cached bookmarks");
                self.items = value
                    .bookmarks
                    .into_iter()
                    .filter(|b| b.topic.is_some())
                    .collect();
                self.state = BookmarkState::Offline;
                self.last_error = Some(error);
            }
            Loaded::Empty { error } => {
                self.items.clear();
                self.state = BookmarkState::Offline;
                self.last_error = Some(error.clone());
                return Err(error);
            }
        }

        Ok(&self.items)
    }

    /// Re-enters `Loading` and lists again.
    pub async fn refresh(&mut self) -> Result<&[Bookmark], ApiError> {
        self.begin_refresh();
        self.list().await
    }

    /// Creates a bookmark. The in-memory list gains it only on success.
    pub async fn add(&mut self, topic_id: &str) -> Result<(), ApiError> {
        let request = BookmarkRequest {
            topic_id: topic_id.to_string(),
        };
        let body = serde_json::to_value(&request)
            .map_err(|err| ApiError::decode("bookmark request", err))?;
        let payload = self.api.authed(Method::POST, "/bookmarks", Some(&body)).await?;
        let bookmark: Bookmark = decode("bookmark", &payload)?;

        if !self.is_bookmarked(&bookmark.topic_id) {
            self.items.push(bookmark);
        }
        tracing::debug!(topic_id, "Bookmark added");
        Ok(())
    }

    /// Removes a bookmark.
    ///
    /// The in-memory entry goes first and is not restored if the request
    /// fails; the request error is still returned.
    pub async fn remove(&mut self, topic_id: &str) -> Result<(), ApiError> {
        let path = resource_path("/bookmarks", topic_id)?;
        self.items.retain(|b| b.topic_id != topic_id);

        match self.api.authed(Method::DELETE, &path, None).await {
            Ok(_) => {
                tracing::debug!(topic_id, "Bookmark removed");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(topic_id, kind = %err.kind, "Bookmark removal not confirmed");
                Err(err)
            }
        }
    }
}
