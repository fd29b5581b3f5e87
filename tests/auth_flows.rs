//! Account and session flows driven through the real router against a live
//! database: signup uniqueness, credential checks, session binding, the
//! clearance gate, and logout.
//!
//! These tests need a reachable Postgres. Point `GATEHOUSE_TEST_DSN` at one
//! (the schema from `sql/schema.sql` is applied on connect, idempotently) or
//! the tests skip.

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        Request, StatusCode,
    },
    response::Response,
    Router,
};
use gatehouse::api::{
    app,
    email::{LogEmailSender, Notifier},
    handlers::auth::state::AuthConfig,
};
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));

struct TestDb {
    pool: PgPool,
}

impl TestDb {
    async fn new() -> Result<Self> {
        let Ok(dsn) = std::env::var("GATEHOUSE_TEST_DSN") else {
            eprintln!("Skipping database test: GATEHOUSE_TEST_DSN is not set");
            anyhow::bail!("GATEHOUSE_TEST_DSN is not set");
        };

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&dsn)
            .await
            .context("failed to connect test pool")?;

        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&pool)
            .await
            .context("failed to apply schema")?;

        Ok(Self { pool })
    }

    fn app(&self) -> Router {
        let notifier = Notifier::new(
            Arc::new(LogEmailSender),
            "no-reply@example.com".to_string(),
            "ops@example.com".to_string(),
        );
        app(
            self.pool.clone(),
            Arc::new(AuthConfig::new()),
            Arc::new(notifier),
        )
    }

    async fn signup(&self, email: &str, password: &str) -> Result<Response> {
        let body = format!("email={}&password={password}", email.replace('@', "%40"));
        Ok(self.app().oneshot(post_form("/signup", body)?).await?)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Response> {
        let body = format!("email={}&password={password}", email.replace('@', "%40"));
        Ok(self.app().oneshot(post_form("/login", body)?).await?)
    }

    async fn user_count(&self, email: &str) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("total"))
    }

    async fn session_count(&self, email: &str) -> Result<i64> {
        let query = r"
            SELECT COUNT(*) AS total
            FROM sessions
            JOIN users ON users.id = sessions.user_id
            WHERE users.email = $1
        ";
        let row = sqlx::query(query).bind(email).fetch_one(&self.pool).await?;
        Ok(row.get("total"))
    }
}

// Shared database across tests; unique emails keep them isolated.
fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", Uuid::new_v4().simple())
}

fn post_form(uri: &str, body: String) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))?)
}

fn get_with_cookie(uri: &str, cookie: &str) -> Result<Request<Body>> {
    Ok(Request::builder()
        .uri(uri)
        .header(COOKIE, cookie.to_string())
        .body(Body::empty())?)
}

fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
}

fn set_cookie(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .find_map(|value| {
            let pair = value.to_str().ok()?.split(';').next()?;
            pair.strip_prefix(&format!("{name}="))
                .map(ToString::to_string)
        })
}

fn session_cookie(response: &Response) -> Option<String> {
    set_cookie(response, "gatehouse_session")
        .filter(|token| !token.is_empty())
        .map(|token| format!("gatehouse_session={token}"))
}

async fn body_text(response: Response) -> Result<String> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

#[tokio::test]
async fn duplicate_signup_leaves_the_store_unchanged() -> Result<()> {
    let Ok(db) = TestDb::new().await else {
        return Ok(());
    };
    let email = unique_email("alice");

    let first = db.signup(&email, "password1").await?;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&first), Some("/login"));
    assert_eq!(db.user_count(&email).await?, 1);

    let second = db.signup(&email, "password2").await?;
    assert_eq!(second.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&second), Some("/signup"));
    let flash = set_cookie(&second, "gatehouse_flash").context("duplicate should flash")?;
    assert!(flash.starts_with("danger:"));

    assert_eq!(db.user_count(&email).await?, 1);
    Ok(())
}

#[tokio::test]
async fn login_round_trip_reaches_the_profile() -> Result<()> {
    let Ok(db) = TestDb::new().await else {
        return Ok(());
    };
    let email = unique_email("bob");
    db.signup(&email, "hunter2").await?;

    let response = db.login(&email, "hunter2").await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/profile"));
    let cookie = session_cookie(&response).context("login should set a session cookie")?;

    // The session row is bound to the account that logged in.
    assert_eq!(db.session_count(&email).await?, 1);

    let profile = db.app().oneshot(get_with_cookie("/profile", &cookie)?).await?;
    assert_eq!(profile.status(), StatusCode::OK);
    let body = body_text(profile).await?;
    assert!(body.contains(&email));
    Ok(())
}

#[tokio::test]
async fn wrong_password_never_binds_a_session() -> Result<()> {
    let Ok(db) = TestDb::new().await else {
        return Ok(());
    };
    let email = unique_email("carol");
    db.signup(&email, "correct-horse").await?;

    let response = db.login(&email, "battery-staple").await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
    assert!(session_cookie(&response).is_none());
    let flash = set_cookie(&response, "gatehouse_flash").context("failure should flash")?;
    assert!(flash.starts_with("danger:"));

    assert_eq!(db.session_count(&email).await?, 0);
    Ok(())
}

#[tokio::test]
async fn clearance_flag_gates_the_encrypted_page() -> Result<()> {
    let Ok(db) = TestDb::new().await else {
        return Ok(());
    };
    let email = unique_email("dave");
    db.signup(&email, "hunter2").await?;
    let response = db.login(&email, "hunter2").await?;
    let cookie = session_cookie(&response).context("login should set a session cookie")?;

    // Signup-created accounts have no clearance and see the denied page.
    let denied = db
        .app()
        .oneshot(get_with_cookie("/encrypted", &cookie)?)
        .await?;
    assert_eq!(denied.status(), StatusCode::OK);
    assert!(body_text(denied).await?.contains("Access denied"));

    // Clearance is granted out-of-band; the same session sees the content.
    sqlx::query("UPDATE users SET clearance = TRUE WHERE email = $1")
        .bind(&email)
        .execute(&db.pool)
        .await?;

    let cleared = db
        .app()
        .oneshot(get_with_cookie("/encrypted", &cookie)?)
        .await?;
    assert_eq!(cleared.status(), StatusCode::OK);
    assert!(body_text(cleared).await?.contains("Cleared eyes only."));
    Ok(())
}

#[tokio::test]
async fn logout_deletes_the_session_row() -> Result<()> {
    let Ok(db) = TestDb::new().await else {
        return Ok(());
    };
    let email = unique_email("erin");
    db.signup(&email, "hunter2").await?;
    let response = db.login(&email, "hunter2").await?;
    let cookie = session_cookie(&response).context("login should set a session cookie")?;
    assert_eq!(db.session_count(&email).await?, 1);

    let logout = db.app().oneshot(get_with_cookie("/logout", &cookie)?).await?;
    assert_eq!(logout.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&logout), Some("/login"));
    let cleared = set_cookie(&logout, "gatehouse_session").context("logout should clear cookie")?;
    assert!(cleared.is_empty());

    assert_eq!(db.session_count(&email).await?, 0);

    // The old cookie is anonymous again.
    let profile = db.app().oneshot(get_with_cookie("/profile", &cookie)?).await?;
    assert_eq!(profile.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&profile), Some("/login"));
    Ok(())
}
