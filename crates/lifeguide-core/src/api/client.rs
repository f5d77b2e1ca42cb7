//! HTTP client for the Lifeguide API and the authenticated request layer.
//!
//! Every protected call goes through [`ApiClient::authed`], which reads the
//! token from the injected [`TokenStore`], attaches it as a bearer credential
//! and resolves failures at the boundary:
//!
//! - non-OK response: the session is treated as invalid, the token is
//!   cleared and the caller gets `Unauthenticated` (no retry, no refresh)
//! - no response at all: the caller gets `Unreachable`, the token is kept
//!   so the caller can fall back to the offline cache

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::errors::{ApiError, ApiErrorKind};
use crate::config::Config;
use crate::session::TokenStore;

/// What to do when a protected call is made without a stored token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingToken {
    /// Report `Unauthenticated` without touching the network.
    #[default]
    Skip,
    /// Send the request without credentials and let the server reject it.
    Proceed,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    missing_token: MissingToken,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("missing_token", &self.missing_token)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client for `base_url` (the `/api` prefix is added per request).
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url, tokens)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
            missing_token: MissingToken::default(),
        }
    }

    /// Creates a client from config, applying the configured request timeout.
    pub fn from_config(config: &Config, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self::with_http(http, &config.api_base_url, tokens))
    }

    #[must_use]
    pub fn with_missing_token(mut self, policy: MissingToken) -> Self {
        self.missing_token = policy;
        self
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// Reads the stored token. An unreadable store counts as no token.
    pub fn current_token(&self) -> Option<String> {
        match self.tokens.load() {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "Failed to read session token");
                None
            }
        }
    }

    /// Clears the stored token, logging (not propagating) store failures.
    pub fn invalidate_session(&self) {
        match self.tokens.clear() {
            Ok(true) => tracing::info!("Session token cleared"),
            Ok(false) => {}
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "Failed to clear session token");
            }
        }
    }

    /// Sends a protected request and returns the JSON body of an OK response.
    pub async fn authed(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let token = self.current_token();
        if token.is_none() && self.missing_token == MissingToken::Skip {
            tracing::debug!(%method, path, "No session token; skipping protected request");
            return Err(ApiError::unauthenticated("Not logged in"));
        }

        let mut request = self.request(method.clone(), path);
        if let Some(token) = &token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, path, "Sending protected request");
        let response = request.send().await.map_err(|err| {
            tracing::warn!(%method, path, error = %err, "Server unreachable");
            ApiError::unreachable(&err)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%method, path, status = status.as_u16(), "Session rejected");
            self.invalidate_session();
            return Err(ApiError {
                kind: ApiErrorKind::Unauthenticated,
                ..ApiError::http_status(status.as_u16(), &body)
            });
        }

        read_json(response).await
    }

    /// Sends a public GET and returns the JSON body of an OK response.
    pub async fn get_public(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        tracing::debug!(path, "Sending public request");
        let response = self
            .request(Method::GET, path)
            .query(query)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(path, error = %err, "Server unreachable");
                ApiError::unreachable(&err)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http_status(status.as_u16(), &body));
        }

        read_json(response).await
    }
}

async fn read_json(response: Response) -> Result<Value, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|err| ApiError::unreachable(&err))?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|err| ApiError::decode("response body", err))
}

/// Builds `{collection}/{id}` with `id` escaped as exactly one path segment.
///
/// Dot segments are refused: URL normalization would collapse them into a
/// different endpoint.
pub(crate) fn resource_path(collection: &str, id: &str) -> Result<String, ApiError> {
    if matches!(id, "" | "." | "..") {
        return Err(ApiError::new(
            ApiErrorKind::NotFound,
            format!("Invalid resource id {id:?}"),
        ));
    }
    // byte_serialize writes spaces as '+' and escapes a literal '+' as %2B.
    let segment: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    Ok(format!("{collection}/{}", segment.replace('+', "%20")))
}

/// Decodes a JSON payload into a typed response.
pub fn decode<T: DeserializeOwned>(what: &str, value: &Value) -> Result<T, ApiError> {
    T::deserialize(value).map_err(|err| ApiError::decode(what, err))
}
