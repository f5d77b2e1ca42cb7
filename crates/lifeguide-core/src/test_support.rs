use serde_json::{Value, json};

/// Base URL of a local port with nothing listening on it.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn topic_json(topic_id: &str) -> Value {
    json!({
        "topic_id": topic_id,
        "category_slug": "first-aid",
        "title": format!("Title {topic_id}"),
        "description": "Short description",
        "content": "Step by step",
        "icon": "heart",
        "tags": ["emergency"]
    })
}

pub fn topic_detail_json(topic_id: &str) -> Value {
    json!({
        "topic": topic_json(topic_id),
        "videos": [{
            "video_id": "vid1",
            "title": "How to",
            "description": "Video",
            "thumbnail": "https://img/v.png",
            "channel_title": "Red Cross"
        }]
    })
}

pub fn bookmark_json(topic_id: &str, with_topic: bool) -> Value {
    json!({
        "bookmark_id": format!("bm_{topic_id}"),
        "user_id": "user_1",
        "topic_id": topic_id,
        "created_at": "2024-05-01T12:00:00.123456+00:00",
        "topic": if with_topic { topic_json(topic_id) } else { Value::Null }
    })
}

pub fn user_json() -> Value {
    json!({
        "user_id": "user_1",
        "email": "ada@example.com",
        "name": "Ada",
        "picture": "https://img/ada.png"
    })
}
