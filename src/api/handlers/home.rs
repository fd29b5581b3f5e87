//! Static public pages.

use axum::response::Html;

use crate::api::pages;

/// `GET /` - landing page.
pub async fn home() -> Html<String> {
    pages::home()
}

/// `GET /public` - page anyone can read.
pub async fn public() -> Html<String> {
    pages::public()
}

/// `GET /denied` - standalone denied page (also rendered by `/encrypted`).
pub async fn denied() -> Html<String> {
    pages::denied()
}
