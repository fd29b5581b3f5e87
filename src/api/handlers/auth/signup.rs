//! Signup form and submission.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::error;

use super::{
    storage::{insert_user, SignupOutcome},
    utils::{hash_password, normalize_email, valid_email},
};
use crate::api::{
    flash::{self, Level},
    pages,
};

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
}

/// `GET /signup` - render the form, consuming any pending flash.
pub async fn form(headers: HeaderMap) -> Response {
    let pending = flash::take(&headers);
    let mut response_headers = HeaderMap::new();
    if pending.is_some() {
        response_headers.insert(SET_COOKIE, flash::clear_cookie());
    }
    (response_headers, pages::signup_form(pending.as_ref())).into_response()
}

/// `POST /signup` - create the account or flash the conflict.
pub async fn submit(pool: Extension<PgPool>, Form(form): Form<SignupForm>) -> Response {
    let email = normalize_email(&form.email);
    if !valid_email(&email) {
        return flash::flash_redirect(
            Level::Danger,
            "Please enter a valid email address",
            "/signup",
        );
    }
    if form.password.is_empty() {
        return flash::flash_redirect(Level::Danger, "Please choose a password", "/signup");
    }

    let password_hash = match hash_password(&form.password) {
        Ok(hash) => hash,
        Err(err) => {
            error!("Failed to hash password: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match insert_user(&pool, &email, &password_hash).await {
        Ok(SignupOutcome::Created) => Redirect::to("/login").into_response(),
        Ok(SignupOutcome::Conflict) => {
            flash::flash_redirect(Level::Danger, "Email address already exists", "/signup")
        }
        Err(err) => {
            error!("Failed to create user: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
