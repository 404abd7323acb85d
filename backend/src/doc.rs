//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the consultation endpoint and its request and
//! response schemas. The document backs Swagger UI in debug builds and is
//! exported by `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::ContactResponse;
use crate::inbound::http::contact::ContactRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "vSecureBytes consultation API",
        description = "Accepts consultation requests from the public website."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(crate::inbound::http::contact::submit_contact),
    components(schemas(ContactRequest, ContactResponse)),
    tags(
        (name = "contact", description = "Consultation requests")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn object_fields(doc: &utoipa::openapi::OpenApi, name: &str) -> Vec<String> {
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema for {name}"),
        }
    }

    #[test]
    fn contact_path_is_documented_as_post() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/api/contact").expect("contact path");

        let post = item.post.as_ref().expect("post operation");
        assert_eq!(post.operation_id.as_deref(), Some("submitContact"));
        assert!(post.responses.responses.contains_key("200"));
        assert!(post.responses.responses.contains_key("400"));
    }

    #[test]
    fn request_schema_uses_wire_names() {
        let fields = object_fields(&ApiDoc::openapi(), "ContactRequest");

        for field in ["fullName", "email", "company", "interest", "message"] {
            assert!(fields.iter().any(|name| name == field), "missing {field}");
        }
    }

    #[test]
    fn response_schema_has_envelope_fields() {
        let fields = object_fields(&ApiDoc::openapi(), "ContactResponse");

        assert!(fields.iter().any(|name| name == "success"));
        assert!(fields.iter().any(|name| name == "message"));
    }
}
