//! Resource keys for the offline cache.

/// Key for the authenticated user's bookmark list.
pub const BOOKMARKS_KEY: &str = "bookmarks";

const TOPIC_PREFIX: &str = "topic_";

/// Key for a topic detail payload.
pub fn topic_key(topic_id: &str) -> String {
    format!("{TOPIC_PREFIX}{topic_id}")
}
