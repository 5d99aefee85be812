use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use std::sync::Arc;
use tracing::debug;
use utoipa::OpenApi;

use crate::models::{ContactSubmission, FailureKind, SubmissionResponse, SubmissionResult};
use crate::providers::EmailProvider;
use crate::service::ContactService;

pub const TAG: &str = "contact";

/// OpenAPI documentation for the contact API
#[derive(OpenApi)]
#[openapi(
    paths(submit_contact),
    components(schemas(ContactSubmission, SubmissionResponse)),
    tags(
        (name = TAG, description = "Campus Guide contact form")
    )
)]
pub struct ApiDoc;

/// Create the contact router
pub fn router<P: EmailProvider + 'static>(service: Arc<ContactService<P>>) -> Router {
    Router::new()
        .route("/contact", post(submit_contact))
        .with_state(service)
}

impl FailureKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            FailureKind::Validation => StatusCode::BAD_REQUEST,
            FailureKind::Configuration => StatusCode::SERVICE_UNAVAILABLE,
            FailureKind::Transport => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for SubmissionResult {
    fn into_response(self) -> Response {
        let status = match &self {
            SubmissionResult::Success { .. } => StatusCode::OK,
            SubmissionResult::Failure { kind, .. } => kind.status_code(),
        };

        (status, Json(SubmissionResponse::from(self))).into_response()
    }
}

/// Submit the contact form
///
/// POST /contact
#[utoipa::path(
    post,
    path = "/contact",
    tag = TAG,
    request_body = ContactSubmission,
    responses(
        (status = 200, description = "Email accepted by the relay", body = SubmissionResponse),
        (status = 400, description = "Missing fields, invalid email or malformed body", body = SubmissionResponse),
        (status = 502, description = "Relay unreachable or delivery rejected", body = SubmissionResponse),
        (status = 503, description = "SMTP settings missing or invalid", body = SubmissionResponse)
    )
)]
async fn submit_contact<P: EmailProvider>(
    State(service): State<Arc<ContactService<P>>>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Response {
    let Json(submission) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "Rejected contact request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(SubmissionResponse::failure(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                ))),
            )
                .into_response();
        }
    };

    service.submit(&submission).await.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind_status_codes() {
        assert_eq!(FailureKind::Validation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            FailureKind::Configuration.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(FailureKind::Transport.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_success_response_is_ok() {
        let response = SubmissionResult::Success {
            message_id: "<id@example.com>".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_openapi_documents_contact_path() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/contact"));
    }
}
