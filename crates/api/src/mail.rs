//! SMTP forwarding for the public contact form.
//!
//! The office reads contact submissions as plain-text email. [`ContactMailer`]
//! drives lettre's async STARTTLS transport; construction is gated on
//! [`EmailConfig::from_env`], which yields `None` unless both `SMTP_HOST`
//! and `CONTACT_TO` are present.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Deserialize;

/// STARTTLS submission port, used when `SMTP_PORT` is unset.
const FALLBACK_SMTP_PORT: u16 = 587;

/// Sender used when `SMTP_FROM` is unset.
const FALLBACK_FROM: &str = "noreply@sitedesk.local";

/// SMTP settings plus the office mailbox address.
///
/// Environment variables: `SMTP_HOST` and `CONTACT_TO` are required (their
/// absence disables mail entirely); `SMTP_PORT` (default 587), `SMTP_FROM`,
/// and the `SMTP_USER`/`SMTP_PASSWORD` pair are optional.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// Sender address on the forwarded mail.
    pub from_address: String,
    /// Office inbox that receives every contact submission.
    pub contact_to: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Read SMTP settings, or `None` when a required variable is absent.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        let contact_to = std::env::var("CONTACT_TO").ok()?;

        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(FALLBACK_SMTP_PORT);
        let from_address = std::env::var("SMTP_FROM").unwrap_or_else(|_| FALLBACK_FROM.into());

        Some(Self {
            smtp_host: host,
            smtp_port: port,
            from_address,
            contact_to,
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

/// Body of `POST /api/contact`. Every field defaults to empty so a sparse
/// form still deserializes; the handler forwards whatever arrived.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

/// What can fail between the form post and the SMTP hand-off.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("smtp: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("address: {0}")]
    BadAddress(#[from] lettre::address::AddressError),
    #[error("message assembly: {0}")]
    Assembly(String),
}

/// Forwards contact submissions to the office mailbox.
pub struct ContactMailer {
    config: EmailConfig,
}

impl ContactMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Forward one submission as plain text. A visitor address that parses
    /// becomes the Reply-To.
    pub async fn send_contact(&self, msg: &ContactMessage) -> Result<(), MailError> {
        let email = self.compose(msg)?;
        self.transport()?.send(email).await?;
        tracing::info!(visitor = %msg.email, "contact form forwarded");
        Ok(())
    }

    fn compose(&self, msg: &ContactMessage) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(self.config.contact_to.parse()?)
            .subject(format!("New Contact Form Message from {}", msg.name))
            .header(ContentType::TEXT_PLAIN);

        if let Ok(reply_to) = msg.email.trim().parse::<Mailbox>() {
            builder = builder.reply_to(reply_to);
        }

        let body = format!(
            "Name: {}\nEmail: {}\nPhone: {}\n\n{}",
            msg.name, msg.email, msg.phone, msg.message
        );
        builder
            .body(body)
            .map_err(|e| MailError::Assembly(e.to_string()))
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(builder.build())
    }
}
