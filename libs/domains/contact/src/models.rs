use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A visitor's contact form submission.
///
/// Missing JSON fields deserialize as empty strings and are reported by
/// field validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ContactSubmission {
    /// Visitor name
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// Visitor email address
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// Message body
    #[schema(example = "Where is the central library?")]
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }
}

/// Which stage rejected a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Blank fields or a malformed address.
    Validation,
    /// SMTP settings missing or invalid.
    Configuration,
    /// The relay or the rendering step failed.
    Transport,
}

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success {
        message_id: String,
    },
    Failure {
        kind: FailureKind,
        error_message: String,
    },
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success { .. })
    }

    pub fn message_id(&self) -> Option<&str> {
        match self {
            SubmissionResult::Success { message_id } => Some(message_id),
            SubmissionResult::Failure { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionResult::Success { .. } => None,
            SubmissionResult::Failure { error_message, .. } => Some(error_message),
        }
    }
}

/// Wire form of [`SubmissionResult`].
///
/// `{ "success": true, "messageId": "..." }` or `{ "success": false, "error": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message_id: None,
            error: Some(error.into()),
        }
    }
}

impl From<SubmissionResult> for SubmissionResponse {
    fn from(result: SubmissionResult) -> Self {
        match result {
            SubmissionResult::Success { message_id } => Self {
                success: true,
                message_id: Some(message_id),
                error: None,
            },
            SubmissionResult::Failure { error_message, .. } => Self::failure(error_message),
        }
    }
}

/// Values interpolated into the contact email templates.
#[derive(Debug, Clone, Serialize)]
pub struct ContactEmailData {
    pub name: String,
    pub email: String,
    pub message: String,
    pub logo_url: String,
    pub institution_name: String,
    pub form_name: String,
}
