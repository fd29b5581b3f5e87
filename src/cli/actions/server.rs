use crate::api::{
    self,
    email::{EmailSender, HttpEmailSender, LogEmailSender, Notifier},
    handlers::auth::state::AuthConfig,
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::info;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub session_ttl_seconds: i64,
    pub secure_cookies: bool,
    pub mail_api_url: Option<String>,
    pub mail_api_key: Option<SecretString>,
    pub mail_from: String,
    pub mail_operator: String,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the DSN is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    // Fail fast on malformed DSNs instead of surfacing a pool error later.
    Url::parse(&args.dsn).context("invalid GATEHOUSE_DSN")?;

    let auth_config = AuthConfig::new()
        .with_session_ttl_seconds(args.session_ttl_seconds)
        .with_secure_cookies(args.secure_cookies);

    let sender: Arc<dyn EmailSender> = match (&args.mail_api_url, args.mail_api_key) {
        (Some(url), Some(key)) => Arc::new(HttpEmailSender::new(url.clone(), key)?),
        _ => {
            info!("No mail API configured, contact notifications will be logged only");
            Arc::new(LogEmailSender)
        }
    };
    let notifier = Notifier::new(sender, args.mail_from, args.mail_operator);

    api::new(args.port, args.dsn, auth_config, notifier).await
}
