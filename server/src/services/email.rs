//! Outgoing mail: provider abstraction and message templates.
//!
//! The production backend is Resend; `MAILER_SERVICE=log` swaps in a mailer
//! that only writes the message to the log, for local development.

use std::sync::Arc;

use async_trait::async_trait;
use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;

use crate::config::{MailerConfig, MailerService};

const VALIDATE_EMAIL_TEMPLATE: &str = include_str!("../../templates/validate_email.html");
const RESET_PASSWORD_TEMPLATE: &str = include_str!("../../templates/reset_password.html");

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("email delivery failed: {0}")]
    Delivery(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError>;
}

pub struct ResendMailer {
    client: Resend,
    from: String,
}

impl ResendMailer {
    #[must_use]
    pub fn new(api_key: &str, from: &str) -> Self {
        Self { client: Resend::new(api_key), from: from.to_owned() }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        let to = [email.to.as_str()];
        let message = CreateEmailBaseOptions::new(&self.from, to, &email.subject).with_html(&email.html);
        self.client
            .emails
            .send(message)
            .await
            .map_err(|e| EmailError::Delivery(e.to_string()))?;
        tracing::debug!(to = %email.to, subject = %email.subject, "email sent");
        Ok(())
    }
}

pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        tracing::info!(to = %email.to, subject = %email.subject, bytes = email.html.len(), "email not sent (log mailer)");
        tracing::debug!(to = %email.to, html = %email.html, "log mailer body");
        Ok(())
    }
}

/// Build the mailer selected by `MAILER_SERVICE`.
#[must_use]
pub fn mailer_from_config(config: &MailerConfig) -> Arc<dyn Mailer> {
    match config.service {
        MailerService::Resend => Arc::new(ResendMailer::new(&config.secret_key, &config.email)),
        MailerService::Log => Arc::new(LogMailer),
    }
}

#[must_use]
pub fn validation_link(webservice_url: &str, token: &str) -> String {
    format!("{webservice_url}/api/auth/validate-email/{token}")
}

#[must_use]
pub fn password_reset_link(webservice_url: &str, token: &str) -> String {
    format!("{webservice_url}/reset-password/{token}")
}

#[must_use]
pub fn validation_email(to: &str, name: &str, link: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_owned(),
        subject: "Validate your email".to_owned(),
        html: render_template(VALIDATE_EMAIL_TEMPLATE, to, name, link),
    }
}

#[must_use]
pub fn password_reset_email(to: &str, name: &str, link: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_owned(),
        subject: "Reset your password".to_owned(),
        html: render_template(RESET_PASSWORD_TEMPLATE, to, name, link),
    }
}

fn render_template(template: &str, email: &str, name: &str, link: &str) -> String {
    template
        .replace("{{EMAIL}}", &escape_html(email))
        .replace("{{NAME}}", &escape_html(name))
        .replace("{{LINK}}", link)
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "email_test.rs"]
mod tests;
