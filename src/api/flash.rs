//! One-shot flash messages carried across redirects in a cookie.
//!
//! A redirecting handler sets `gatehouse_flash`; the next rendered page
//! consumes the value and clears the cookie. The message text is base64
//! encoded so arbitrary user-facing strings stay cookie-safe.

use axum::{
    http::{
        header::{InvalidHeaderValue, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    response::{IntoResponse, Redirect, Response},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use tracing::error;

pub const FLASH_COOKIE_NAME: &str = "gatehouse_flash";

/// Flash categories, rendered as the banner's CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Danger,
}

impl Level {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Danger => "danger",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "success" => Some(Level::Success),
            "danger" => Some(Level::Danger),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

/// Extract a named cookie value from the request headers.
pub(crate) fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == name {
            return Some(val.to_string());
        }
    }
    None
}

/// Build the `Set-Cookie` header carrying a flash message.
///
/// # Errors
/// Returns an error if the encoded message is not a valid header value.
pub fn set_cookie(flash: &Flash) -> Result<HeaderValue, InvalidHeaderValue> {
    let encoded = URL_SAFE_NO_PAD.encode(flash.message.as_bytes());
    // Short-lived on purpose; the cookie only needs to survive one redirect.
    HeaderValue::from_str(&format!(
        "{FLASH_COOKIE_NAME}={}:{encoded}; Path=/; HttpOnly; SameSite=Lax; Max-Age=60",
        flash.level.as_str()
    ))
}

/// Build the `Set-Cookie` header that clears a consumed flash message.
#[must_use]
pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("gatehouse_flash=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Read the pending flash message, if any. Malformed cookies are dropped.
#[must_use]
pub fn take(headers: &HeaderMap) -> Option<Flash> {
    let raw = cookie_value(headers, FLASH_COOKIE_NAME)?;
    let mut parts = raw.splitn(2, ':');
    let level = Level::parse(parts.next()?)?;
    let encoded = parts.next()?;
    let bytes = URL_SAFE_NO_PAD.decode(encoded.as_bytes()).ok()?;
    let message = String::from_utf8(bytes).ok()?;
    Some(Flash { level, message })
}

/// Redirect while queueing a flash message for the next rendered page.
#[must_use]
pub fn flash_redirect(level: Level, message: &str, location: &str) -> Response {
    let mut headers = HeaderMap::new();
    match set_cookie(&Flash {
        level,
        message: message.to_string(),
    }) {
        Ok(cookie) => {
            headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => {
            // The redirect still happens; the user just misses the notice.
            error!("Failed to build flash cookie: {err}");
        }
    }
    (headers, Redirect::to(location)).into_response()
}
