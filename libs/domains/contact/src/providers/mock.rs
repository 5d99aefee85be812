//! Mock email provider for testing and local development.

use super::{EmailContent, EmailProvider, SentEmail};
use crate::error::{NotificationError, NotificationResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct Recording {
    sent: Vec<EmailContent>,
    attempts: usize,
    outcomes: VecDeque<Result<(), String>>,
}

/// Mock email provider that captures sent emails.
///
/// Each `send` consumes the next scripted outcome; once the script is
/// exhausted every send succeeds.
#[derive(Clone)]
pub struct MockEmailProvider {
    recording: Arc<Mutex<Recording>>,
    healthy: bool,
}

impl MockEmailProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self {
            recording: Arc::new(Mutex::new(Recording::default())),
            healthy: true,
        }
    }

    /// Create a mock provider whose first send fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_outcomes([Err(message.into())])
    }

    /// Create a mock provider replaying `outcomes` in order
    pub fn with_outcomes(outcomes: impl IntoIterator<Item = Result<(), String>>) -> Self {
        Self {
            recording: Arc::new(Mutex::new(Recording {
                outcomes: outcomes.into_iter().collect(),
                ..Default::default()
            })),
            healthy: true,
        }
    }

    /// Make the liveness probe fail
    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    /// Get all successfully sent emails
    pub async fn sent_emails(&self) -> Vec<EmailContent> {
        self.recording.lock().await.sent.clone()
    }

    /// Number of delivery attempts, failed ones included
    pub async fn attempts(&self) -> usize {
        self.recording.lock().await.attempts
    }
}

impl Default for MockEmailProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailProvider for MockEmailProvider {
    async fn send(&self, email: &EmailContent) -> NotificationResult<SentEmail> {
        let mut recording = self.recording.lock().await;
        recording.attempts += 1;

        if let Some(Err(message)) = recording.outcomes.pop_front() {
            return Err(NotificationError::ProviderError(message));
        }

        recording.sent.push(email.clone());

        Ok(SentEmail {
            message_id: email.message_id.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    async fn health_check(&self) -> NotificationResult<bool> {
        if self.healthy {
            Ok(true)
        } else {
            Err(NotificationError::ProviderError(
                "Mock health check failed".to_string(),
            ))
        }
    }
}
