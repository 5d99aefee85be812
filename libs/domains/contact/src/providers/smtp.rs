//! SMTP email provider implementation using lettre.
//!
//! Built without connection pooling: every `send` and `health_check` opens
//! its own session with the relay.

use super::{EmailContent, EmailProvider, SentEmail};
use crate::error::{NotificationError, NotificationResult};
use crate::transport::TransportConfig;
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
        response::Code,
    },
};
use std::io;
use std::sync::Arc;
use tracing::{debug, error, info};

/// SMTP email provider for the campus relay.
pub struct SmtpProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    config: Arc<TransportConfig>,
    from: Mailbox,
}

impl SmtpProvider {
    /// Create a provider sending as `"<from_name>" <username>`.
    pub fn new(config: TransportConfig, from_name: &str) -> NotificationResult<Self> {
        let transport = Self::build_transport(&config)?;
        let from = Mailbox::new(Some(from_name.to_string()), config.mailbox().parse()?);

        Ok(Self {
            transport,
            config: Arc::new(config),
            from,
        })
    }

    /// Build the SMTP transport based on configuration.
    fn build_transport(
        config: &TransportConfig,
    ) -> NotificationResult<AsyncSmtpTransport<Tokio1Executor>> {
        let tls_parameters = TlsParameters::builder(config.host.clone())
            .dangerous_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| {
                NotificationError::ConfigError(format!("Failed to build TLS parameters: {}", e))
            })?;

        let tls = if config.implicit_tls {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .tls(tls)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(config.session_timeout()))
            .build();

        Ok(transport)
    }

    /// Build a lettre Message from EmailContent.
    fn build_message(&self, email: &EmailContent) -> NotificationResult<Message> {
        let to: Mailbox = email.to_email.parse().map_err(|e| {
            NotificationError::InvalidEmail(format!("Invalid to address: {}", e))
        })?;

        Message::builder()
            .message_id(Some(email.message_id.clone()))
            .from(self.from.clone())
            .to(to)
            .subject(&email.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body.clone()),
                    ),
            )
            .map_err(|e| {
                NotificationError::ProviderError(format!("Failed to build email message: {}", e))
            })
    }
}

/// Failure family of a lettre error. The prefix carries the keyword the
/// visitor-facing classifier looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SmtpFailure {
    Timeout,
    Authentication,
    Connection,
    Send,
}

impl SmtpFailure {
    fn of(err: &lettre::transport::smtp::Error) -> Self {
        Self::from_parts(err.is_timeout(), err.status(), io_error_kind(err))
    }

    fn from_parts(timed_out: bool, status: Option<Code>, io: Option<io::ErrorKind>) -> Self {
        if timed_out || io == Some(io::ErrorKind::TimedOut) {
            Self::Timeout
        // 530, 534 and 535 are the relay's authentication refusals.
        } else if status.is_some_and(|code| code.to_string().starts_with("53")) {
            Self::Authentication
        } else if io.is_some() {
            Self::Connection
        } else {
            Self::Send
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Self::Timeout => "SMTP timeout",
            Self::Authentication => "SMTP authentication failed",
            Self::Connection => "SMTP connection failed",
            Self::Send => "SMTP send failed",
        }
    }
}

fn describe_smtp_error(err: &lettre::transport::smtp::Error) -> String {
    format!("{}: {}", SmtpFailure::of(err).prefix(), err)
}

fn io_error_kind(err: &lettre::transport::smtp::Error) -> Option<io::ErrorKind> {
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<io::Error>() {
            return Some(io.kind());
        }
        source = cause.source();
    }
    None
}

#[async_trait]
impl EmailProvider for SmtpProvider {
    async fn send(&self, email: &EmailContent) -> NotificationResult<SentEmail> {
        debug!(
            to = %email.to_email,
            subject = %email.subject,
            host = %self.config.host,
            port = %self.config.port,
            implicit_tls = self.config.implicit_tls,
            "Sending email via SMTP"
        );

        let message = self.build_message(email)?;

        let response = self.transport.send(message).await.map_err(|e| {
            error!(
                to = %email.to_email,
                error = %e,
                "Failed to send email via SMTP"
            );
            NotificationError::ProviderError(describe_smtp_error(&e))
        })?;

        info!(
            message_id = %email.message_id,
            relay_reply = ?response.message().next(),
            "Email sent successfully via SMTP"
        );

        Ok(SentEmail {
            message_id: email.message_id.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "SMTP"
    }

    async fn health_check(&self) -> NotificationResult<bool> {
        self.transport
            .test_connection()
            .await
            .map_err(|e| NotificationError::ProviderError(describe_smtp_error(&e)))
    }
}
