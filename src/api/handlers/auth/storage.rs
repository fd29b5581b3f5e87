//! Database helpers for the user store and sessions.

use anyhow::{anyhow, Context, Result};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use super::utils::{generate_session_token, hash_session_token, is_unique_violation};

/// Outcome when attempting to create a new account.
#[derive(Debug)]
pub(crate) enum SignupOutcome {
    Created,
    Conflict,
}

/// A persisted account row.
pub(crate) struct UserRecord {
    pub(crate) id: Uuid,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    pub(crate) clearance: bool,
}

/// Look up an account by normalized email. No side effects.
pub(crate) async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
    let query = "SELECT id, email, password_hash, clearance FROM users WHERE email = $1 LIMIT 1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup user by email")?;

    Ok(row.map(|row| UserRecord {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        clearance: row.get("clearance"),
    }))
}

/// Rehydrate the session-bound user.
pub(crate) async fn load_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
    let query = "SELECT id, email, password_hash, clearance FROM users WHERE id = $1 LIMIT 1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to load user by id")?;

    Ok(row.map(|row| UserRecord {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        clearance: row.get("clearance"),
    }))
}

/// Create an account unless the email is already taken.
///
/// The duplicate check and the insert run in one transaction; the table
/// intentionally carries no UNIQUE constraint on email (the contract is an
/// application-level check, not a storage invariant).
pub(crate) async fn insert_user(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
) -> Result<SignupOutcome> {
    let mut tx = pool.begin().await.context("begin signup transaction")?;

    let query = "SELECT 1 FROM users WHERE email = $1 LIMIT 1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let existing = sqlx::query(query)
        .bind(email)
        .fetch_optional(&mut *tx)
        .instrument(span)
        .await
        .context("failed to check email uniqueness")?;

    if existing.is_some() {
        tx.rollback().await.context("rollback signup conflict")?;
        return Ok(SignupOutcome::Conflict);
    }

    let query = r"
        INSERT INTO users (email, password_hash)
        VALUES ($1, $2)
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    sqlx::query(query)
        .bind(email)
        .bind(password_hash)
        .execute(&mut *tx)
        .instrument(span)
        .await
        .context("failed to insert user")?;

    tx.commit().await.context("commit signup transaction")?;

    Ok(SignupOutcome::Created)
}

/// Create a session row and return the raw token for the cookie.
pub(crate) async fn insert_session(
    pool: &PgPool,
    user_id: Uuid,
    ttl_seconds: i64,
) -> Result<String> {
    // Generate a random token, store only its hash, and return the raw value
    // so the caller can set the session cookie.
    let query = r"
        INSERT INTO sessions (session_hash, user_id, expires_at)
        VALUES ($1, $2, NOW() + ($3 * INTERVAL '1 second'))
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );

    for _ in 0..3 {
        let token = generate_session_token()?;
        let token_hash = hash_session_token(&token);
        let result = sqlx::query(query)
            .bind(token_hash)
            .bind(user_id)
            .bind(ttl_seconds)
            .execute(pool)
            .instrument(span.clone())
            .await;

        match result {
            Ok(_) => return Ok(token),
            Err(err) if is_unique_violation(&err) => {}
            Err(err) => return Err(err).context("failed to insert session"),
        }
    }

    Err(anyhow!("failed to generate unique session token"))
}

/// Resolve a token hash into the bound user id, rejecting expired sessions.
///
/// The caller rehydrates the account via `load_user_by_id`; the session
/// table itself only knows the binding.
pub(crate) async fn lookup_session(pool: &PgPool, token_hash: &[u8]) -> Result<Option<Uuid>> {
    let query = r"
        SELECT user_id
        FROM sessions
        WHERE session_hash = $1
          AND expires_at > NOW()
        LIMIT 1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(token_hash)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup session")?;

    Ok(row.map(|row| row.get("user_id")))
}

/// Delete a session row. Logout is idempotent; zero rows deleted is fine.
pub(crate) async fn delete_session(pool: &PgPool, token_hash: &[u8]) -> Result<()> {
    let query = "DELETE FROM sessions WHERE session_hash = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(token_hash)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to delete session")?;
    Ok(())
}
