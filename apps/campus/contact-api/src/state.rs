//! Application state management.

use domain_contact::{ContactService, SmtpProvider};
use std::sync::Arc;

/// Shared application state.
///
/// Cloned for each handler; the contact service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Contact form delivery through the SMTP relay
    pub contact: Arc<ContactService<SmtpProvider>>,
}
