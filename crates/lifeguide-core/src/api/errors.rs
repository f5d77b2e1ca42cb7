use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Categories of request failures, resolved locally at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// No token, or the server rejected it. The token has been cleared.
    Unauthenticated,
    /// No response at all (connect, timeout, transport). The token is kept.
    Unreachable,
    /// Server reachable but the resource does not exist
    NotFound,
    /// Any other non-OK status on an unauthenticated request
    HttpStatus,
    /// Response body did not match the expected schema
    Decode,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Unauthenticated => write!(f, "unauthenticated"),
            ApiErrorKind::Unreachable => write!(f, "unreachable"),
            ApiErrorKind::NotFound => write!(f, "not_found"),
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Decode => write!(f, "decode"),
        }
    }
}

/// Structured request error with kind and details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g., raw error body)
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unauthenticated, message)
    }

    pub fn unreachable(err: &reqwest::Error) -> Self {
        Self::new(ApiErrorKind::Unreachable, format!("Server unreachable: {err}"))
    }

    pub fn decode(what: &str, err: impl fmt::Display) -> Self {
        Self::new(ApiErrorKind::Decode, format!("Failed to decode {what}: {err}"))
    }

    /// Creates an error for a non-OK status, pulling `detail` out of a
    /// FastAPI-style `{"detail": "..."}` body when present.
    pub fn http_status(status: u16, body: &str) -> Self {
        let kind = if status == 404 {
            ApiErrorKind::NotFound
        } else {
            ApiErrorKind::HttpStatus
        };

        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| json.get("detail")?.as_str().map(str::to_string));

        let message = match detail {
            Some(detail) => format!("HTTP {status}: {detail}"),
            None => format!("HTTP {status}"),
        };

        Self {
            kind,
            message,
            details: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.kind == ApiErrorKind::Unauthenticated
    }

    pub fn is_unreachable(&self) -> bool {
        self.kind == ApiErrorKind::Unreachable
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_extracts_detail() {
        let err = ApiError::http_status(404, r#"{"detail":"Topic not found"}"#);
        assert_eq!(err.kind, ApiErrorKind::NotFound);
        assert_eq!(err.message, "HTTP 404: Topic not found");
        assert!(err.details.is_some());
    }

    #[test]
    fn test_http_status_plain_body() {
        let err = ApiError::http_status(502, "");
        assert_eq!(err.kind, ApiErrorKind::HttpStatus);
        assert_eq!(err.to_string(), "HTTP 502");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ApiErrorKind::Unauthenticated.to_string(), "unauthenticated");
        assert_eq!(ApiErrorKind::Decode.to_string(), "decode");
    }
}
