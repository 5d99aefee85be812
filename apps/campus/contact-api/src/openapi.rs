use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Campus Guide Contact API",
        version = "0.1.0",
        description = "Delivers Campus Guide contact form submissions to the site mailbox"
    ),
    servers(
        (url = "/api", description = "API base path")
    )
)]
struct BaseDoc;

/// Application document: base info plus the contact domain's paths.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        BaseDoc::openapi().merge_from(domain_contact::ApiDoc::openapi())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_contains_contact_path() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "Campus Guide Contact API");
        assert!(doc.paths.paths.contains_key("/contact"));
    }
}
