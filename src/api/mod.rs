//! HTTP surface: router construction, shared layers, and the server loop.

use crate::api::{
    email::Notifier,
    handlers::{auth, contact, health, home},
};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    routing::get,
    Extension, Router,
};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;

pub mod email;
pub mod flash;
pub mod handlers;
pub(crate) mod pages;

/// Build the application router with all routes and shared state installed.
#[must_use]
pub fn app(
    pool: PgPool,
    auth_config: Arc<auth::state::AuthConfig>,
    notifier: Arc<Notifier>,
) -> Router {
    Router::new()
        .route("/", get(home::home))
        .route("/public", get(home::public))
        .route("/denied", get(home::denied))
        .route(
            "/signup",
            get(auth::signup::form).post(auth::signup::submit),
        )
        .route("/login", get(auth::login::form).post(auth::login::submit))
        .route("/profile", get(auth::profile::profile))
        .route("/encrypted", get(auth::profile::encrypted))
        .route("/logout", get(auth::session::logout))
        .route("/contact", get(contact::form).post(contact::submit))
        .route("/health", get(health::health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(auth_config))
                .layer(Extension(notifier)),
        )
        .layer(Extension(pool))
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(
    port: u16,
    dsn: String,
    auth_config: auth::state::AuthConfig,
    notifier: Notifier,
) -> Result<()> {
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
        .connect(&dsn)
        .await
        .context("Failed to connect to database")?;

    let app = app(pool, Arc::new(auth_config), Arc::new(notifier));

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
