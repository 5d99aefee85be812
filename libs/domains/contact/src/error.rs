//! Error types for the contact domain.

use crate::classify::classify_failure;
use crate::models::FailureKind;
use thiserror::Error;

/// Result type for provider and template operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Result type for contact submissions.
pub type ContactResult<T> = Result<T, ContactError>;

/// Errors raised below the service: mail transport and template rendering.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationError {
    /// Email provider error (connection, authentication, timeout, rejection).
    #[error("Email provider error: {0}")]
    ProviderError(String),

    /// Template registration or rendering error.
    #[error("Template rendering error: {0}")]
    TemplateError(String),

    /// An address could not be parsed into a mailbox.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Transport could not be built from its configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl NotificationError {
    /// The underlying message without the variant prefix.
    pub fn detail(&self) -> &str {
        match self {
            Self::ProviderError(msg)
            | Self::TemplateError(msg)
            | Self::InvalidEmail(msg)
            | Self::ConfigError(msg) => msg,
        }
    }
}

impl From<handlebars::RenderError> for NotificationError {
    fn from(err: handlebars::RenderError) -> Self {
        NotificationError::TemplateError(err.to_string())
    }
}

impl From<lettre::address::AddressError> for NotificationError {
    fn from(err: lettre::address::AddressError) -> Self {
        NotificationError::InvalidEmail(err.to_string())
    }
}

/// Everything that can turn a submission into a failure result.
///
/// The `Display` text of the validation and configuration variants is the
/// message shown to the visitor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please fill in all required fields (name, email, and message).")]
    MissingFields,

    #[error("Please provide a valid email address.")]
    InvalidEmail,

    #[error("SMTP configuration is missing: {}. Please check your .env file.", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    #[error("Invalid SMTP_PORT: {0}. Must be a number between 1 and 65535.")]
    InvalidPort(String),

    /// Settings were present but the transport could not be built from them.
    #[error("SMTP configuration is invalid: {0}. Please check your .env file.")]
    InvalidConfig(String),

    #[error(transparent)]
    Provider(#[from] NotificationError),
}

impl ContactError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingFields | Self::InvalidEmail => FailureKind::Validation,
            Self::MissingConfig(_) | Self::InvalidPort(_) | Self::InvalidConfig(_) => {
                FailureKind::Configuration
            }
            Self::Provider(_) => FailureKind::Transport,
        }
    }

    /// Message presented to the visitor.
    ///
    /// Provider failures go through [`classify_failure`]; everything else is
    /// already user-facing.
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider(err) => classify_failure(err.detail()),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::smtp::{SMTP_PASS, SMTP_PORT};

    #[test]
    fn test_missing_config_message_lists_names() {
        let err = ContactError::MissingConfig(vec![SMTP_PORT, SMTP_PASS]);
        assert_eq!(
            err.user_message(),
            "SMTP configuration is missing: SMTP_PORT, SMTP_PASS. Please check your .env file."
        );
        assert_eq!(err.kind(), FailureKind::Configuration);
    }

    #[test]
    fn test_invalid_port_message() {
        let err = ContactError::InvalidPort("abc".to_string());
        assert_eq!(
            err.user_message(),
            "Invalid SMTP_PORT: abc. Must be a number between 1 and 65535."
        );
    }

    #[test]
    fn test_invalid_config_is_reported_verbatim() {
        let err =
            ContactError::InvalidConfig("Invalid email address: missing domain".to_string());
        assert_eq!(err.kind(), FailureKind::Configuration);
        assert_eq!(
            err.user_message(),
            "SMTP configuration is invalid: Invalid email address: missing domain. \
             Please check your .env file."
        );
    }

    #[test]
    fn test_provider_error_is_classified_on_detail() {
        let err = ContactError::from(NotificationError::ProviderError(
            "relay said no".to_string(),
        ));
        assert_eq!(err.user_message(), "relay said no");
        assert_eq!(err.kind(), FailureKind::Transport);
    }

    #[test]
    fn test_validation_kinds() {
        assert_eq!(ContactError::MissingFields.kind(), FailureKind::Validation);
        assert_eq!(ContactError::InvalidEmail.kind(), FailureKind::Validation);
    }
}
