//! Mail notifier arguments.
//!
//! Without `--mail-api-url` the server falls back to the logging sender, so
//! local development needs no mail credentials at all.

use anyhow::{anyhow, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_MAIL_API_URL: &str = "mail-api-url";
pub const ARG_MAIL_API_KEY: &str = "mail-api-key";
pub const ARG_MAIL_FROM: &str = "mail-from";
pub const ARG_MAIL_OPERATOR: &str = "mail-operator";

const DEFAULT_FROM: &str = "no-reply@localhost";

#[derive(Debug)]
pub struct Options {
    pub api_url: Option<String>,
    pub api_key: Option<SecretString>,
    pub from: String,
    pub operator: String,
}

impl Options {
    /// Collect mail options from parsed matches.
    ///
    /// # Errors
    /// Returns an error when an API URL is configured without a key.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let api_url = matches.get_one::<String>(ARG_MAIL_API_URL).cloned();
        let api_key = matches
            .get_one::<String>(ARG_MAIL_API_KEY)
            .map(|key| SecretString::from(key.clone()));

        if api_url.is_some() && api_key.is_none() {
            return Err(anyhow!(
                "missing required argument: --{ARG_MAIL_API_KEY} (required with --{ARG_MAIL_API_URL})"
            ));
        }

        let from = matches
            .get_one::<String>(ARG_MAIL_FROM)
            .cloned()
            .unwrap_or_else(|| DEFAULT_FROM.to_string());

        // Contact notifications go to a fixed operator address; default to
        // the sender identity when none is given.
        let operator = matches
            .get_one::<String>(ARG_MAIL_OPERATOR)
            .cloned()
            .unwrap_or_else(|| from.clone());

        Ok(Self {
            api_url,
            api_key,
            from,
            operator,
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_MAIL_API_URL)
                .long(ARG_MAIL_API_URL)
                .help("HTTP mail API endpoint for contact notifications")
                .env("GATEHOUSE_MAIL_API_URL"),
        )
        .arg(
            Arg::new(ARG_MAIL_API_KEY)
                .long(ARG_MAIL_API_KEY)
                .help("Bearer key for the mail API")
                .env("GATEHOUSE_MAIL_API_KEY"),
        )
        .arg(
            Arg::new(ARG_MAIL_FROM)
                .long(ARG_MAIL_FROM)
                .help("Sender address for outbound notifications")
                .env("GATEHOUSE_MAIL_FROM"),
        )
        .arg(
            Arg::new(ARG_MAIL_OPERATOR)
                .long(ARG_MAIL_OPERATOR)
                .help("Operator address that receives contact form submissions")
                .env("GATEHOUSE_MAIL_OPERATOR"),
        )
}
