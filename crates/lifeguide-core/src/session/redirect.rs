//! Session identifier extraction from identity-provider redirects.
//!
//! The provider hands the identifier back in the redirect URL. Depending on
//! the platform it lands in the fragment (`#session_id=...`), in the query
//! string (`?session_id=...`), or somewhere in a URL that does not parse
//! cleanly. Strategies are tried in that order.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

const PARAM: &str = "session_id";

// Anchored so `other_session_id=` does not count.
static SESSION_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[?&#;\s])session_id=([^&#\s]+)").expect("session_id pattern is valid")
});

/// Where an identifier was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSource {
    Fragment,
    Query,
    Pattern,
}

impl fmt::Display for IdSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdSource::Fragment => write!(f, "fragment"),
            IdSource::Query => write!(f, "query"),
            IdSource::Pattern => write!(f, "pattern"),
        }
    }
}

/// Extracts the session identifier from a redirect URL.
///
/// Returns `None` when no strategy yields a non-empty identifier; callers
/// must not submit anything in that case.
pub fn extract_session_id(input: &str) -> Option<String> {
    extract_with_source(input).map(|(id, _)| id)
}

/// Like [`extract_session_id`], also reporting which strategy matched.
pub fn extract_with_source(input: &str) -> Option<(String, IdSource)> {
    let value = input.trim();
    if value.is_empty() {
        return None;
    }

    from_fragment(value)
        .map(|id| (id, IdSource::Fragment))
        .or_else(|| from_query(value).map(|id| (id, IdSource::Query)))
        .or_else(|| from_pattern(value).map(|id| (id, IdSource::Pattern)))
}

/// Checks that an identifier is worth submitting.
pub fn is_valid_session_id(id: &str) -> bool {
    let trimmed = id.trim();
    !trimmed.is_empty() && !trimmed.chars().any(char::is_whitespace)
}

fn from_fragment(value: &str) -> Option<String> {
    let (_, fragment) = value.split_once('#')?;
    find_param(fragment)
}

fn from_query(value: &str) -> Option<String> {
    if let Ok(url) = url::Url::parse(value) {
        return url
            .query_pairs()
            .find(|(k, _)| k == PARAM)
            .map(|(_, v)| v.into_owned())
            .filter(|id| is_valid_session_id(id));
    }

    let (_, query) = value.split_once('?')?;
    let query = query.split_once('#').map_or(query, |(q, _)| q);
    find_param(query)
}

fn from_pattern(value: &str) -> Option<String> {
    SESSION_ID_PATTERN
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|id| is_valid_session_id(id))
}

fn find_param(params: &str) -> Option<String> {
    url::form_urlencoded::parse(params.as_bytes())
        .find(|(k, _)| k == PARAM)
        .map(|(_, v)| v.into_owned())
        .filter(|id| is_valid_session_id(id))
}
