//! Outbound email for contact-form notifications.
//!
//! Delivery sits behind the `EmailSender` trait so the transport can be
//! swapped without touching handlers. The default for local dev is
//! `LogEmailSender`, which logs the message and reports success;
//! `HttpEmailSender` posts JSON to an HTTP mail API with a bearer key.
//!
//! Sends are best-effort: the contact handler logs failures and turns them
//! into a flash message, never an error response.

use crate::APP_USER_AGENT;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use std::{sync::Arc, time::Duration};
use tracing::info;

#[derive(Clone, Debug)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
}

/// Email delivery abstraction used by the notifier.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver a message or return an error to mark it as failed.
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Local dev sender that logs the payload instead of sending real email.
#[derive(Clone, Debug)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "email send stub"
        );
        Ok(())
    }
}

/// Sender that posts messages to an HTTP mail API.
pub struct HttpEmailSender {
    client: Client,
    api_url: String,
    api_key: SecretString,
}

impl HttpEmailSender {
    /// Build the sender with a bounded request timeout.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(api_url: String, api_key: SecretString) -> Result<Self> {
        let client = ClientBuilder::new()
            .user_agent(APP_USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build mail API client")?;
        Ok(Self {
            client,
            api_url,
            api_key,
        })
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let payload = json!({
            "from": message.from,
            "to": [message.to],
            "subject": message.subject,
            "text": message.body,
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .context("mail API request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("mail API returned {status}: {body}"));
        }

        Ok(())
    }
}

/// Contact-form notifier bound to a fixed operator address.
pub struct Notifier {
    sender: Arc<dyn EmailSender>,
    from: String,
    operator: String,
}

impl Notifier {
    #[must_use]
    pub fn new(sender: Arc<dyn EmailSender>, from: String, operator: String) -> Self {
        Self {
            sender,
            from,
            operator,
        }
    }

    /// Send a contact-form submission to the operator address.
    ///
    /// # Errors
    /// Returns the transport error; callers decide how to surface it.
    pub async fn send_contact_notification(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<()> {
        let message = contact_notification(&self.operator, &self.from, name, email, message);
        self.sender.send(&message).await
    }
}

fn contact_notification(
    operator: &str,
    from: &str,
    name: &str,
    email: &str,
    message: &str,
) -> EmailMessage {
    EmailMessage {
        to: operator.to_string(),
        from: from.to_string(),
        subject: format!("New contact form submission from {name}"),
        body: format!("Name: {name}\nEmail: {email}\nMessage:\n{message}"),
    }
}
