//! Session cookie handling and the authentication guard.

use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Redirect, Response},
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use super::{
    state::AuthConfig,
    storage::{delete_session, load_user_by_id, lookup_session},
    utils::hash_session_token,
};
use crate::api::flash::cookie_value;

const SESSION_COOKIE_NAME: &str = "gatehouse_session";

/// The user bound to a valid session cookie.
pub(crate) struct SessionRecord {
    pub(crate) user_id: Uuid,
    pub(crate) email: String,
    pub(crate) clearance: bool,
}

/// Resolve the session cookie into the bound user, if present.
///
/// Returns `Ok(None)` when the cookie is missing, malformed, or stale. The
/// account is loaded fresh on every request, so flag changes (clearance)
/// take effect without a new login.
pub(crate) async fn authenticate_session(
    headers: &HeaderMap,
    pool: &PgPool,
) -> Result<Option<SessionRecord>, StatusCode> {
    let Some(token) = extract_session_token(headers) else {
        return Ok(None);
    };
    // Only the hash is stored; never compare raw tokens against the database.
    let token_hash = hash_session_token(&token);
    let user_id = match lookup_session(pool, &token_hash).await {
        Ok(Some(user_id)) => user_id,
        Ok(None) => return Ok(None),
        Err(err) => {
            error!("Failed to lookup session: {err}");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    match load_user_by_id(pool, user_id).await {
        // A session row whose user has gone away counts as anonymous.
        Ok(user) => Ok(user.map(|user| SessionRecord {
            user_id: user.id,
            email: user.email,
            clearance: user.clearance,
        })),
        Err(err) => {
            error!("Failed to load session user: {err}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// `GET /logout` - delete the session row, clear the cookie, go to login.
pub async fn logout(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    config: Extension<Arc<AuthConfig>>,
) -> Response {
    // Gated route: anonymous clients get the plain redirect without cookies.
    match authenticate_session(&headers, &pool).await {
        Ok(Some(_)) => {}
        Ok(None) => return Redirect::to("/login").into_response(),
        Err(status) => return status.into_response(),
    }

    if let Some(token) = extract_session_token(&headers) {
        let token_hash = hash_session_token(&token);
        if let Err(err) = delete_session(&pool, &token_hash).await {
            error!("Failed to delete session: {err}");
        }
    }

    // Always clear the cookie, even if the session row was already gone.
    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie(&config) {
        response_headers.insert(SET_COOKIE, cookie);
    }
    (response_headers, Redirect::to("/login")).into_response()
}

/// Build a secure `HttpOnly` cookie for the session token.
pub(crate) fn session_cookie(
    config: &AuthConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = config.session_ttl_seconds();
    let secure = config.secure_cookies();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn clear_session_cookie(config: &AuthConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = config.secure_cookies();
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    cookie_value(headers, SESSION_COOKIE_NAME)
}
