//! Session lifecycle: token storage, login exchange, auth checks and logout.

pub mod exchange;
pub mod redirect;
pub mod token_store;

pub use exchange::{ExchangeResult, exchange_session_id, login_from_redirect, token_from_set_cookie};
pub use redirect::{IdSource, extract_session_id, extract_with_source, is_valid_session_id};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore, mask_token};

use lifeguide_types::UserProfile;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, COOKIE};

use crate::api::{ApiClient, ApiError, ApiErrorKind, decode};

/// Outcome of an authentication check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    SignedIn(UserProfile),
    /// No token, or the server rejected it. The token is gone.
    SignedOut,
    /// Server unreachable; the token is kept for the next check.
    Offline,
}

/// Fetches the current user with the stored token.
pub async fn current_user(api: &ApiClient) -> Result<UserProfile, ApiError> {
    let payload = api.authed(Method::GET, "/auth/me", None).await?;
    decode("user profile", &payload)
}

/// Checks whether the stored token still identifies a user.
///
/// A profile that fails to decode is treated like a rejection: the token is
/// cleared so the user signs in again.
pub async fn check_auth(api: &ApiClient) -> AuthStatus {
    match current_user(api).await {
        Ok(user) => AuthStatus::SignedIn(user),
        Err(err) => match err.kind {
            ApiErrorKind::Unreachable => AuthStatus::Offline,
            ApiErrorKind::Decode => {
                tracing::warn!(error = %err, "Unexpected profile payload");
                api.invalidate_session();
                AuthStatus::SignedOut
            }
            _ => AuthStatus::SignedOut,
        },
    }
}

/// Ends the session.
///
/// The server is told when a token exists, but its answer does not matter:
/// the local token is cleared either way.
pub async fn logout(api: &ApiClient) {
    if let Some(token) = api.current_token() {
        let result = api
            .request(Method::POST, "/auth/logout")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(COOKIE, format!("session_token={token}"))
            .send()
            .await;
        match result {
            Ok(response) => {
                tracing::debug!(status = response.status().as_u16(), "Logout acknowledged");
            }
            Err(err) => tracing::warn!(error = %err, "Logout request failed"),
        }
    }

    api.invalidate_session();
    tracing::info!("Logged out");
}
