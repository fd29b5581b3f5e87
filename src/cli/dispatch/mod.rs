//! Command-line argument dispatch and server initialization.
//!
//! This module parses validated CLI arguments and maps them to the
//! appropriate action, such as starting the server with its full
//! configuration state.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{mail, ARG_DSN, ARG_PORT, ARG_SECURE_COOKIES, ARG_SESSION_TTL};
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")?;
    let session_ttl_seconds = matches
        .get_one::<i64>(ARG_SESSION_TTL)
        .copied()
        .unwrap_or(43200);
    let secure_cookies = matches.get_flag(ARG_SECURE_COOKIES);

    let mail_opts = mail::Options::parse(matches)?;

    Ok(Action::Server(Box::new(Args {
        port,
        dsn,
        session_ttl_seconds,
        secure_cookies,
        mail_api_url: mail_opts.api_url,
        mail_api_key: mail_opts.api_key,
        mail_from: mail_opts.from,
        mail_operator: mail_opts.operator,
    })))
}
