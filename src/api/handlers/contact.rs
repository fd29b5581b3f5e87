//! Contact form with best-effort email notification.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

use crate::api::{
    email::Notifier,
    flash::{self, Level},
    pages,
};

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// `GET /contact` - render the form, consuming any pending flash.
pub async fn form(headers: HeaderMap) -> Response {
    let pending = flash::take(&headers);
    let mut response_headers = HeaderMap::new();
    if pending.is_some() {
        response_headers.insert(SET_COOKIE, flash::clear_cookie());
    }
    (response_headers, pages::contact_form(pending.as_ref())).into_response()
}

/// `POST /contact` - notify the operator and always redirect back.
///
/// Transport failures stop here: they are logged and flashed, never turned
/// into an error response.
pub async fn submit(notifier: Extension<Arc<Notifier>>, Form(form): Form<ContactForm>) -> Response {
    match notifier
        .send_contact_notification(&form.name, &form.email, &form.message)
        .await
    {
        Ok(()) => flash::flash_redirect(
            Level::Success,
            "Form submitted and email sent successfully!",
            "/contact",
        ),
        Err(err) => {
            error!("Failed to send contact notification: {err}");
            flash::flash_redirect(
                Level::Danger,
                "An error occurred while sending the email.",
                "/contact",
            )
        }
    }
}
