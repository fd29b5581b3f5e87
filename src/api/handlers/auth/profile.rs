//! Gated pages: the profile and the clearance-gated encrypted page.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};
use sqlx::PgPool;

use super::session::authenticate_session;
use crate::api::{flash, pages};

/// `GET /profile` - show the bound user's email.
pub async fn profile(headers: HeaderMap, pool: Extension<PgPool>) -> Response {
    let record = match authenticate_session(&headers, &pool).await {
        Ok(Some(record)) => record,
        Ok(None) => return Redirect::to("/login").into_response(),
        Err(status) => return status.into_response(),
    };

    let pending = flash::take(&headers);
    let mut response_headers = HeaderMap::new();
    if pending.is_some() {
        response_headers.insert(SET_COOKIE, flash::clear_cookie());
    }
    (
        response_headers,
        pages::profile(&record.email, pending.as_ref()),
    )
        .into_response()
}

/// `GET /encrypted` - gated content only for users with clearance.
///
/// The clearance flag is per user and only ever set out-of-band (no route
/// mutates it); accounts created via signup default to no clearance and see
/// the denied page.
pub async fn encrypted(headers: HeaderMap, pool: Extension<PgPool>) -> Response {
    let record = match authenticate_session(&headers, &pool).await {
        Ok(Some(record)) => record,
        Ok(None) => return Redirect::to("/login").into_response(),
        Err(status) => return status.into_response(),
    };

    if record.clearance {
        pages::encrypted().into_response()
    } else {
        pages::denied().into_response()
    }
}
