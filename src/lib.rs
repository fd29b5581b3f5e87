//! # Gatehouse
//!
//! `gatehouse` is a small session-authenticated web portal: user signup and
//! login backed by a Postgres user table, a clearance-gated page, and a
//! contact form that best-effort emails submissions to a fixed operator
//! address.
//!
//! ## Sessions
//!
//! Authentication is cookie-based. A successful login stores the SHA-256
//! hash of a random token in the `sessions` table and hands the raw token
//! back in an `HttpOnly` cookie; raw tokens never touch the database.
//! Gated routes (`/profile`, `/logout`, `/encrypted`) redirect anonymous
//! clients to `/login` instead of rendering.
//!
//! ## Flash messages
//!
//! Validation and notifier outcomes are carried across redirects in a
//! one-shot cookie that the next rendered page consumes and clears.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
