//! Login form, credential verification, and session issuance.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

use super::{
    session::session_cookie,
    state::AuthConfig,
    storage::{find_user_by_email, insert_session},
    utils::{normalize_email, verify_password},
};
use crate::api::{
    flash::{self, Level},
    pages,
};

// One generic message for every credential failure; the response never
// reveals whether the account exists.
const LOGIN_FAILED: &str = "Please check your login details and try again.";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// `GET /login` - render the form, consuming any pending flash.
pub async fn form(headers: HeaderMap) -> Response {
    let pending = flash::take(&headers);
    let mut response_headers = HeaderMap::new();
    if pending.is_some() {
        response_headers.insert(SET_COOKIE, flash::clear_cookie());
    }
    (response_headers, pages::login_form(pending.as_ref())).into_response()
}

/// `POST /login` - verify credentials and bind the session.
pub async fn submit(
    pool: Extension<PgPool>,
    config: Extension<Arc<AuthConfig>>,
    Form(form): Form<LoginForm>,
) -> Response {
    let email = normalize_email(&form.email);

    let user = match find_user_by_email(&pool, &email).await {
        Ok(user) => user,
        Err(err) => {
            error!("Failed to lookup user: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let Some(user) = user else {
        return flash::flash_redirect(Level::Danger, LOGIN_FAILED, "/login");
    };

    match verify_password(&form.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => return flash::flash_redirect(Level::Danger, LOGIN_FAILED, "/login"),
        Err(err) => {
            // A hash we cannot parse is a data problem, not the user's;
            // log it loudly but answer like any other failed login.
            error!("Failed to verify password for {email}: {err}");
            return flash::flash_redirect(Level::Danger, LOGIN_FAILED, "/login");
        }
    }

    let token = match insert_session(&pool, user.id, config.session_ttl_seconds()).await {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to create session: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut response_headers = HeaderMap::new();
    match session_cookie(&config, &token) {
        Ok(cookie) => {
            response_headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    (response_headers, Redirect::to("/profile")).into_response()
}
