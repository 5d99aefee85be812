//! Email provider implementations.
//!
//! This module contains the `EmailProvider` trait and implementations
//! for the SMTP relay and for tests.

mod mock;
mod smtp;

pub use mock::MockEmailProvider;
pub use smtp::SmtpProvider;

use crate::error::NotificationResult;
use async_trait::async_trait;

/// Represents an email accepted by the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    /// Message-ID of the accepted message.
    pub message_id: String,
}

/// Email content ready for sending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailContent {
    /// Message-ID header value, including angle brackets.
    pub message_id: String,
    /// Recipient email address.
    pub to_email: String,
    /// Email subject.
    pub subject: String,
    /// HTML body content.
    pub html_body: String,
    /// Plain text body content.
    pub text_body: String,
}

/// Trait for email sending providers.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Send an email. Exactly one delivery attempt per call.
    async fn send(&self, email: &EmailContent) -> NotificationResult<SentEmail>;

    /// Get the provider name for logging.
    fn name(&self) -> &'static str;

    /// Lightweight handshake with the relay.
    async fn health_check(&self) -> NotificationResult<bool>;
}
