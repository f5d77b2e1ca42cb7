//! Wire types shared by the Lifeguide client crates.
//!
//! One struct per endpoint payload. Fields the server always sends are
//! required, so a payload missing them fails to decode instead of leaking
//! half-filled values into the UI. Fields the server fills with defaults
//! (`picture`, `tags`, `topic_count`, `videos`) default when absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated user, as returned by `/api/auth/me` and `/api/auth/session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub picture: String,
}

/// Request body for `POST /api/auth/session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    pub session_id: String,
}

/// Response body for `POST /api/auth/session`.
///
/// The server returns the user document with `session_token` merged in at the
/// top level; the nested `{user, session_token}` shape is accepted as well.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SessionPayload {
    Nested {
        user: UserProfile,
        #[serde(default)]
        session_token: Option<String>,
    },
    Flat {
        #[serde(flatten)]
        user: UserProfile,
        #[serde(default)]
        session_token: Option<String>,
    },
}

impl SessionPayload {
    pub fn into_parts(self) -> (UserProfile, Option<String>) {
        match self {
            SessionPayload::Nested {
                user,
                session_token,
            }
            | SessionPayload::Flat {
                user,
                session_token,
            } => (user, session_token.filter(|t| !t.is_empty())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub icon: String,
    pub image_url: String,
    #[serde(default)]
    pub topic_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub topic_id: String,
    pub category_slug: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub icon: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A video search hit attached to a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub channel_title: String,
}

impl Video {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

/// `GET /api/topics/:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDetail {
    pub topic: Topic,
    #[serde(default)]
    pub videos: Vec<Video>,
}

/// `GET /api/categories/:slug`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub category: Category,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// `GET /api/search?q=`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub results: Vec<Topic>,
}

/// `GET /api/videos/search?q=`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResults {
    #[serde(default)]
    pub videos: Vec<Video>,
}

/// Request body for `POST /api/bookmarks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkRequest {
    pub topic_id: String,
}

/// A saved topic. `topic` is a snapshot joined in by the server and is `None`
/// when the topic no longer exists in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub bookmark_id: String,
    pub topic_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub topic: Option<Topic>,
}

/// `GET /api/bookmarks`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkList {
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_payload_flat_shape() {
        let json = r#"{
            "user_id": "user_1",
            "email": "a@example.com",
            "name": "Ada",
            "picture": "https://img/a.png",
            "created_at": "2024-05-01T12:00:00+00:00",
            "session_token": "tok-1"
        }"#;
        let payload: SessionPayload = serde_json::from_str(json).unwrap();
        let (user, token) = payload.into_parts();
        assert_eq!(user.user_id, "user_1");
        assert_eq!(token.as_deref(), Some("tok-1"));
    }

    #[test]
    fn test_session_payload_nested_shape() {
        let json = r#"{
            "user": {"user_id": "u1", "email": "u@example.com", "name": "U", "picture": ""},
            "session_token": "tok-xyz"
        }"#;
        let payload: SessionPayload = serde_json::from_str(json).unwrap();
        let (user, token) = payload.into_parts();
        assert_eq!(user.user_id, "u1");
        assert_eq!(token.as_deref(), Some("tok-xyz"));
    }

    #[test]
    fn test_session_payload_without_token() {
        let json = r#"{"user_id": "u1", "email": "u@example.com", "name": "U"}"#;
        let payload: SessionPayload = serde_json::from_str(json).unwrap();
        let (user, token) = payload.into_parts();
        assert_eq!(user.picture, "");
        assert!(token.is_none());
    }

    #[test]
    fn test_empty_session_token_is_treated_as_absent() {
        let json = r#"{"user_id": "u1", "email": "u@example.com", "name": "U", "session_token": ""}"#;
        let payload: SessionPayload = serde_json::from_str(json).unwrap();
        assert!(payload.into_parts().1.is_none());
    }

    #[test]
    fn test_user_profile_missing_field_is_an_error() {
        let json = r#"{"email": "u@example.com", "name": "U"}"#;
        assert!(serde_json::from_str::<UserProfile>(json).is_err());
    }

    #[test]
    fn test_bookmark_list_with_missing_topic_snapshot() {
        let json = r#"{"bookmarks": [
            {"bookmark_id": "bm_1", "user_id": "u1", "topic_id": "t_gone",
             "created_at": "2024-05-01T12:00:00.123456+00:00", "topic": null}
        ]}"#;
        let list: BookmarkList = serde_json::from_str(json).unwrap();
        assert_eq!(list.bookmarks.len(), 1);
        assert!(list.bookmarks[0].topic.is_none());
    }

    #[test]
    fn test_topic_detail_defaults_videos() {
        let json = r#"{"topic": {
            "topic_id": "t_cpr", "category_slug": "first-aid", "title": "CPR",
            "description": "d", "content": "c", "icon": "heart"
        }}"#;
        let detail: TopicDetail = serde_json::from_str(json).unwrap();
        assert!(detail.videos.is_empty());
        assert!(detail.topic.tags.is_empty());
    }

    #[test]
    fn test_video_watch_url() {
        let video = Video {
            video_id: "abc".to_string(),
            title: String::new(),
            description: String::new(),
            thumbnail: String::new(),
            channel_title: String::new(),
        };
        assert_eq!(video.watch_url(), "https://www.youtube.com/watch?v=abc");
    }
}
