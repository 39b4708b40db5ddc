// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contact-us mail and the about document.

use crate::config::SmtpConfig;
use crate::db::CommsRepository;
use crate::error::AppError;
use crate::models::{About, ContactUs, UserIdentity};
use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;

/// A plain-text message addressed to the application mailbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// Sender's display name and address, used as Reply-To
    pub reply_to_name: String,
    pub reply_to: String,
    pub subject: String,
    pub body: String,
}

/// Outbound mail delivery.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), AppError>;
}

/// Delivers through an authenticated STARTTLS relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    mailbox: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, AppError> {
        let mailbox: Mailbox = config.username.parse().map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Invalid SMTP_USERNAME mailbox: {}", e))
        })?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("SMTP relay setup failed: {}", e)))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport, mailbox })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), AppError> {
        let reply_to = Mailbox::new(
            Some(mail.reply_to_name.clone()),
            mail.reply_to
                .parse()
                .map_err(|_| AppError::BadRequest("invalid sender email".to_string()))?,
        );

        let message = Message::builder()
            .from(self.mailbox.clone())
            .reply_to(reply_to)
            .to(self.mailbox.clone())
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body.clone())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build mail: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("SMTP delivery failed: {}", e)))?;
        Ok(())
    }
}

/// Used when no SMTP relay is configured. Every send fails.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, _mail: &OutgoingMail) -> Result<(), AppError> {
        Err(AppError::Internal(anyhow::anyhow!(
            "mail delivery is not configured (set SMTP_HOST)"
        )))
    }
}

#[derive(Clone)]
pub struct CommsService {
    comms: Arc<dyn CommsRepository>,
    mailer: Arc<dyn Mailer>,
}

impl CommsService {
    pub fn new(comms: Arc<dyn CommsRepository>, mailer: Arc<dyn Mailer>) -> Self {
        Self { comms, mailer }
    }

    /// Mail the message to the application mailbox, then keep a copy.
    /// Nothing is stored if delivery fails.
    pub async fn send_contact_us(
        &self,
        user: &UserIdentity,
        subject: &str,
        message: &str,
    ) -> Result<ContactUs, AppError> {
        self.mailer
            .send(&OutgoingMail {
                reply_to_name: user.display_name.clone(),
                reply_to: user.email.clone(),
                subject: subject.to_string(),
                body: message.to_string(),
            })
            .await?;

        let contact = ContactUs::new(&user.id, &user.email, subject, message);
        self.comms.create_contact_us(&contact).await?;

        tracing::info!(user_id = %user.id, contact_id = %contact.id, "Contact message sent");
        Ok(contact)
    }

    pub async fn about(&self) -> Result<About, AppError> {
        self.comms
            .get_about()
            .await?
            .ok_or_else(|| AppError::NotFound("about details not found".to_string()))
    }
}
