//! Contact submission service: validation, rendering and delivery.

use crate::error::{ContactError, ContactResult, NotificationResult};
use crate::models::{ContactEmailData, ContactSubmission, FailureKind, SubmissionResult};
use crate::providers::{EmailContent, EmailProvider, SmtpProvider};
use crate::templates::TemplateEngine;
use crate::transport::TransportConfig;
use crate::validation::validate_submission;
use core_config::smtp::SmtpEnv;
use core_config::{ConfigError, FromEnv, env_or_default};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

const LOGO_PATH: &str = "/assets/images/logo/kitslogo-bg.png";

/// Configuration for the contact service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactServiceConfig {
    /// Public base URL of the site, used for the logo image.
    pub base_url: String,
    /// Display name on the From header.
    pub sender_name: String,
    /// Institution shown in the email footer.
    pub institution_name: String,
    /// Form name shown in the email body and footer.
    pub form_name: String,
}

impl Default for ContactServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            sender_name: "KITS Campus Guide".to_string(),
            institution_name: "KKR & KSR Institute of Technology and Sciences".to_string(),
            form_name: "Campus Guide Contact Form".to_string(),
        }
    }
}

impl FromEnv for ContactServiceConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            base_url: env_or_default("NEXT_PUBLIC_BASE_URL", &defaults.base_url),
            ..defaults
        })
    }
}

impl ContactServiceConfig {
    pub fn logo_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), LOGO_PATH)
    }
}

/// A provider together with the mailbox it delivers to.
struct Outbound<P> {
    provider: P,
    mailbox: String,
}

/// Service handling contact form submissions.
///
/// Settings are resolved once at construction. When they are unusable the
/// service still builds, and every submission reports the stored error.
pub struct ContactService<P: EmailProvider> {
    outbound: Result<Outbound<P>, ContactError>,
    templates: TemplateEngine,
    config: ContactServiceConfig,
}

impl ContactService<SmtpProvider> {
    /// Create a service delivering through the SMTP relay described by `settings`.
    pub fn from_settings(
        settings: &SmtpEnv,
        config: ContactServiceConfig,
    ) -> NotificationResult<Self> {
        let sender_name = config.sender_name.clone();
        Self::build(settings, config, |transport| {
            SmtpProvider::new(transport.clone(), &sender_name)
        })
    }
}

impl<P: EmailProvider> ContactService<P> {
    /// Create a service around an already configured provider.
    pub fn new(
        provider: P,
        transport: &TransportConfig,
        config: ContactServiceConfig,
    ) -> NotificationResult<Self> {
        Ok(Self {
            outbound: Ok(Outbound {
                provider,
                mailbox: transport.mailbox().to_string(),
            }),
            templates: TemplateEngine::new()?,
            config,
        })
    }

    /// Resolve `settings` and hand the result to `make_provider`.
    ///
    /// Only template registration failures are returned. Configuration and
    /// provider construction errors are kept and reported per submission as
    /// configuration failures.
    pub fn build(
        settings: &SmtpEnv,
        config: ContactServiceConfig,
        make_provider: impl FnOnce(&TransportConfig) -> NotificationResult<P>,
    ) -> NotificationResult<Self> {
        let outbound = TransportConfig::resolve(settings).and_then(|transport| {
            info!(
                host = %transport.host,
                port = transport.port,
                implicit_tls = transport.implicit_tls,
                "SMTP transport configured"
            );
            let provider = make_provider(&transport)
                .map_err(|err| ContactError::InvalidConfig(err.to_string()))?;
            Ok(Outbound {
                provider,
                mailbox: transport.mailbox().to_string(),
            })
        });

        if let Err(err) = &outbound {
            warn!(error = %err, "Contact email delivery is unavailable");
        }

        Ok(Self {
            outbound,
            templates: TemplateEngine::new()?,
            config,
        })
    }

    /// The stored configuration error, if the transport could not be built.
    pub fn config_error(&self) -> Option<&ContactError> {
        self.outbound.as_ref().err()
    }

    pub fn config(&self) -> &ContactServiceConfig {
        &self.config
    }

    /// Validate, render and deliver one submission.
    ///
    /// Exactly one delivery attempt is made for a submission that passes
    /// validation; none otherwise.
    pub async fn submit(&self, submission: &ContactSubmission) -> SubmissionResult {
        match self.deliver(submission).await {
            Ok(message_id) => SubmissionResult::Success { message_id },
            Err(err) => {
                let kind = err.kind();
                match kind {
                    FailureKind::Validation => debug!(error = %err, "Contact submission rejected"),
                    FailureKind::Configuration => warn!(error = %err, "Contact submission not sent"),
                    FailureKind::Transport => error!(error = %err, "Error sending contact email"),
                }
                SubmissionResult::Failure {
                    kind,
                    error_message: err.user_message(),
                }
            }
        }
    }

    async fn deliver(&self, submission: &ContactSubmission) -> ContactResult<String> {
        validate_submission(submission)?;

        let outbound = self.outbound.as_ref().map_err(Clone::clone)?;

        self.verify_transport(&outbound.provider).await;

        debug!(
            name = %submission.name,
            email = %submission.email,
            "Rendering contact email"
        );
        let rendered = self.templates.render_contact(&self.email_data(submission))?;

        let content = EmailContent {
            message_id: generate_message_id(&outbound.mailbox),
            to_email: outbound.mailbox.clone(),
            subject: rendered.subject,
            html_body: rendered.html,
            text_body: rendered.text,
        };

        let sent = outbound.provider.send(&content).await?;

        info!(
            message_id = %sent.message_id,
            provider = outbound.provider.name(),
            "Contact email sent"
        );

        Ok(sent.message_id)
    }

    /// Best-effort handshake with the relay before a send.
    ///
    /// The outcome is logged and otherwise ignored.
    async fn verify_transport(&self, provider: &P) {
        match provider.health_check().await {
            Ok(true) => debug!(provider = provider.name(), "SMTP server is ready"),
            Ok(false) => warn!(provider = provider.name(), "SMTP verification failed"),
            Err(err) => warn!(
                provider = provider.name(),
                error = %err,
                "SMTP verification failed"
            ),
        }
    }

    /// Readiness probe: configuration present and relay reachable.
    pub async fn check_transport(&self) -> Result<(), String> {
        let outbound = self.outbound.as_ref().map_err(ContactError::user_message)?;

        match outbound.provider.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("SMTP relay refused the handshake".to_string()),
            Err(err) => Err(err.to_string()),
        }
    }

    fn email_data(&self, submission: &ContactSubmission) -> ContactEmailData {
        ContactEmailData {
            name: submission.name.clone(),
            email: submission.email.clone(),
            message: submission.message.clone(),
            logo_url: self.config.logo_url(),
            institution_name: self.config.institution_name.clone(),
            form_name: self.config.form_name.clone(),
        }
    }
}

/// `<uuid@domain>`, with the domain taken from the sending mailbox.
fn generate_message_id(mailbox: &str) -> String {
    let domain = mailbox
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
        .unwrap_or("localhost");
    format!("<{}@{}>", Uuid::new_v4(), domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{AUTHENTICATION_FAILED, CONNECTION_FAILED, TIMED_OUT};
    use crate::error::NotificationError;
    use crate::providers::SentEmail;
    use async_trait::async_trait;

    mockall::mock! {
        Relay {}

        #[async_trait]
        impl EmailProvider for Relay {
            async fn send(&self, email: &EmailContent) -> NotificationResult<SentEmail>;
            fn name(&self) -> &'static str;
            async fn health_check(&self) -> NotificationResult<bool>;
        }
    }

    fn transport() -> TransportConfig {
        TransportConfig::resolve(&settings()).unwrap()
    }

    fn settings() -> SmtpEnv {
        SmtpEnv {
            host: Some("smtp.example.com".to_string()),
            port: Some("587".to_string()),
            username: Some("campus@example.com".to_string()),
            password: Some("secret".to_string()),
        }
    }

    fn relay() -> MockRelay {
        let mut relay = MockRelay::new();
        relay.expect_name().return_const("relay");
        relay
    }

    fn submission() -> ContactSubmission {
        ContactSubmission::new("Jane Doe", "user@example.com", "Hello")
    }

    #[tokio::test]
    async fn test_submit_sends_once_to_operational_mailbox() {
        let mut relay = relay();
        relay.expect_health_check().times(1).returning(|| Ok(true));
        relay
            .expect_send()
            .times(1)
            .withf(|email| {
                email.to_email == "campus@example.com"
                    && email.subject == "New Contact Form Submission from Jane Doe"
                    && email.message_id.ends_with("@example.com>")
            })
            .returning(|email| {
                Ok(SentEmail {
                    message_id: email.message_id.clone(),
                })
            });

        let service =
            ContactService::new(relay, &transport(), ContactServiceConfig::default()).unwrap();
        let result = service.submit(&submission()).await;

        assert!(result.is_success());
        assert!(result.message_id().unwrap().starts_with('<'));
    }

    #[tokio::test]
    async fn test_validation_failure_skips_provider() {
        let mut relay = relay();
        relay.expect_health_check().never();
        relay.expect_send().never();

        let service =
            ContactService::new(relay, &transport(), ContactServiceConfig::default()).unwrap();
        let result = service
            .submit(&ContactSubmission::new("Jane", "", "Hello"))
            .await;

        assert_eq!(
            result,
            SubmissionResult::Failure {
                kind: FailureKind::Validation,
                error_message: "Please fill in all required fields (name, email, and message)."
                    .to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_probe_failure_does_not_block_send() {
        let mut relay = relay();
        relay
            .expect_health_check()
            .returning(|| Err(NotificationError::ProviderError("probe down".to_string())));
        relay.expect_send().times(1).returning(|email| {
            Ok(SentEmail {
                message_id: email.message_id.clone(),
            })
        });

        let service =
            ContactService::new(relay, &transport(), ContactServiceConfig::default()).unwrap();
        assert!(service.submit(&submission()).await.is_success());
    }

    #[tokio::test]
    async fn test_provider_errors_are_classified() {
        let cases = [
            ("connect ECONNREFUSED 127.0.0.1:587", CONNECTION_FAILED),
            ("Invalid login: 535 rejected", AUTHENTICATION_FAILED),
            ("SMTP timeout: deadline elapsed", TIMED_OUT),
            ("Mailbox full", "Mailbox full"),
        ];

        for (raw, expected) in cases {
            let mut relay = relay();
            relay.expect_health_check().returning(|| Ok(true));
            relay
                .expect_send()
                .times(1)
                .returning(move |_| Err(NotificationError::ProviderError(raw.to_string())));

            let service =
                ContactService::new(relay, &transport(), ContactServiceConfig::default()).unwrap();

            assert_eq!(
                service.submit(&submission()).await,
                SubmissionResult::Failure {
                    kind: FailureKind::Transport,
                    error_message: expected.to_string(),
                },
                "{raw}"
            );
        }
    }

    #[tokio::test]
    async fn test_missing_settings_are_reported_on_submit() {
        let settings = SmtpEnv {
            password: None,
            ..settings()
        };
        let service = ContactService::build(&settings, ContactServiceConfig::default(), |_| {
            Ok(relay())
        })
        .unwrap();

        assert!(service.config_error().is_some());
        let result = service.submit(&submission()).await;
        assert_eq!(
            result.error_message(),
            Some("SMTP configuration is missing: SMTP_PASS. Please check your .env file.")
        );
        assert!(service.check_transport().await.is_err());
    }

    #[tokio::test]
    async fn test_provider_construction_error_is_a_configuration_failure() {
        let service: ContactService<MockRelay> =
            ContactService::build(&settings(), ContactServiceConfig::default(), |_| {
                Err(NotificationError::InvalidEmail("bad mailbox".to_string()))
            })
            .unwrap();

        assert!(matches!(
            service.config_error(),
            Some(ContactError::InvalidConfig(_))
        ));
        let result = service.submit(&submission()).await;
        assert_eq!(
            result,
            SubmissionResult::Failure {
                kind: FailureKind::Configuration,
                error_message: "SMTP configuration is invalid: Invalid email address: bad mailbox. \
                                Please check your .env file."
                    .to_string(),
            }
        );
        assert!(service.check_transport().await.is_err());
    }

    #[tokio::test]
    async fn test_check_transport_reports_refused_handshake() {
        let mut relay = relay();
        relay.expect_health_check().returning(|| Ok(false));

        let service =
            ContactService::new(relay, &transport(), ContactServiceConfig::default()).unwrap();
        assert_eq!(
            service.check_transport().await,
            Err("SMTP relay refused the handshake".to_string())
        );
    }

    #[test]
    fn test_logo_url_joins_base_url() {
        let config = ContactServiceConfig {
            base_url: "https://campus.example.edu/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.logo_url(),
            "https://campus.example.edu/assets/images/logo/kitslogo-bg.png"
        );
        assert_eq!(
            ContactServiceConfig::default().logo_url(),
            "http://localhost:3000/assets/images/logo/kitslogo-bg.png"
        );
    }

    #[test]
    fn test_config_reads_base_url_from_env() {
        temp_env::with_var("NEXT_PUBLIC_BASE_URL", Some("https://kits.example.edu"), || {
            let config = ContactServiceConfig::from_env().unwrap();
            assert_eq!(config.base_url, "https://kits.example.edu");
            assert_eq!(config.sender_name, "KITS Campus Guide");
        });

        temp_env::with_var_unset("NEXT_PUBLIC_BASE_URL", || {
            assert_eq!(
                ContactServiceConfig::from_env().unwrap(),
                ContactServiceConfig::default()
            );
        });
    }

    #[test]
    fn test_message_id_uses_mailbox_domain() {
        let id = generate_message_id("campus@kits.example.edu");
        assert!(id.starts_with('<'));
        assert!(id.ends_with("@kits.example.edu>"));
        assert!(generate_message_id("no-domain").ends_with("@localhost>"));
    }
}
