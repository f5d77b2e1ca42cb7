//! One-time session identifier exchange.
//!
//! The identity provider hands back an opaque `session_id`. It is traded once
//! against `POST /api/auth/session` for a durable bearer token plus the user
//! profile. The exchange is the only place a brand-new token is created.

use std::time::Duration;

use lifeguide_types::{SessionPayload, SessionRequest, UserProfile};
use reqwest::header::SET_COOKIE;
use reqwest::{Method, Response};

use super::redirect::{extract_with_source, is_valid_session_id};
use super::token_store::mask_token;
use crate::api::ApiClient;

const SESSION_COOKIE: &str = "session_token";

/// A successful exchange. The token is already persisted.
#[derive(Debug, Clone)]
pub struct ExchangeResult {
    pub user: UserProfile,
    pub session_token: String,
}

/// Exchanges a session identifier for a token and profile.
///
/// Returns `None` on an invalid identifier (no request is made), any non-OK
/// status, a transport failure, or a response without a token. The stored
/// token is only touched on success.
pub async fn exchange_session_id(api: &ApiClient, session_id: &str) -> Option<ExchangeResult> {
    let session_id = session_id.trim();
    if !is_valid_session_id(session_id) {
        tracing::debug!("Refusing to exchange an empty or malformed session id");
        return None;
    }

    let request = SessionRequest {
        session_id: session_id.to_string(),
    };
    let response = match api
        .request(Method::POST, "/auth/session")
        .json(&request)
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, "Session exchange failed: server unreachable");
            return None;
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "Session exchange rejected");
        return None;
    }

    let (user, session_token) = read_session(response).await?;

    if let Err(err) = api.tokens().save(&session_token) {
        tracing::warn!(error = %format!("{err:#}"), "Failed to persist session token");
        return None;
    }
    tracing::info!(
        user_id = %user.user_id,
        token = %mask_token(&session_token),
        "Session established"
    );

    Some(ExchangeResult {
        user,
        session_token,
    })
}

/// Extracts the identifier from a redirect URL and exchanges it.
///
/// `delay` is waited out first, for platforms where the redirect URL becomes
/// available slightly after the callback fires.
pub async fn login_from_redirect(
    api: &ApiClient,
    redirect_url: &str,
    delay: Duration,
) -> Option<ExchangeResult> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let Some((session_id, source)) = extract_with_source(redirect_url) else {
        tracing::debug!("No session id in redirect URL");
        return None;
    };
    tracing::debug!(%source, "Extracted session id from redirect");

    exchange_session_id(api, &session_id).await
}

/// Reads the profile and token out of an exchange response.
///
/// The body token wins; the `session_token` cookie is the fallback.
async fn read_session(response: Response) -> Option<(UserProfile, String)> {
    let cookie_token = token_from_set_cookie(
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok()),
    );

    let payload: SessionPayload = match response.json().await {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(error = %err, "Failed to decode session exchange response");
            return None;
        }
    };

    let (user, body_token) = payload.into_parts();
    let Some(token) = body_token.or(cookie_token) else {
        tracing::warn!("Session exchange response carried no token");
        return None;
    };
    Some((user, token))
}

/// Finds a non-empty `session_token` value among `Set-Cookie` header values.
pub fn token_from_set_cookie<'a>(headers: impl IntoIterator<Item = &'a str>) -> Option<String> {
    headers.into_iter().find_map(|header| {
        let pair = header.split(';').next()?;
        let (name, value) = pair.split_once('=')?;
        let value = value.trim().trim_matches('"');
        (name.trim() == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}
