pub mod handlers;

use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response structure for requests no route handles.
///
/// # JSON Example
///
/// ```json
/// {
///   "error": "NotFound",
///   "message": "The requested resource was not found"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
