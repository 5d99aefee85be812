//! Contact Domain
//!
//! Server side of the Campus Guide contact form: a visitor's
//! `{ name, email, message }` is validated, rendered into a plain-text and
//! an HTML email, and delivered through the campus SMTP relay to the site's
//! own mailbox.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   API Handler   │  ← POST /contact
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ ContactService  │  ← validate, probe, render, send once
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ Email Provider  │  ← SMTP (lettre) or mock
//! └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use core_config::{FromEnv, smtp::SmtpEnv};
//! use domain_contact::{ContactService, ContactServiceConfig, ContactSubmission};
//!
//! let service = ContactService::from_settings(
//!     &SmtpEnv::from_env()?,
//!     ContactServiceConfig::from_env()?,
//! )?;
//!
//! let result = service
//!     .submit(&ContactSubmission::new("Jane Doe", "jane@example.com", "Hello"))
//!     .await;
//! ```

pub mod classify;
pub mod error;
pub mod handlers;
pub mod models;
pub mod providers;
pub mod service;
pub mod templates;
pub mod transport;
pub mod validation;

// Re-export commonly used types
pub use classify::classify_failure;
pub use error::{ContactError, ContactResult, NotificationError, NotificationResult};
pub use handlers::ApiDoc;
pub use models::{ContactSubmission, FailureKind, SubmissionResponse, SubmissionResult};
pub use providers::{EmailContent, EmailProvider, MockEmailProvider, SentEmail, SmtpProvider};
pub use service::{ContactService, ContactServiceConfig};
pub use templates::TemplateEngine;
pub use transport::TransportConfig;
