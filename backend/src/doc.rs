//! OpenAPI document for the contact book API.

use utoipa::OpenApi;

/// Public OpenAPI surface served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contact Book API",
        description = "Bearer-token authentication and contact CRUD."
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::create_contact,
        crate::inbound::http::contacts::update_contact,
        crate::inbound::http::contacts::delete_contact,
    ),
    components(schemas(
        crate::inbound::http::users::CredentialsRequest,
        crate::inbound::http::users::DetailResponse,
        crate::inbound::http::users::TokenResponse,
        crate::inbound::http::contacts::ContactPayload,
        crate::inbound::http::contacts::ContactResponse,
        crate::inbound::http::error::ApiError,
        crate::domain::ErrorCode,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "contacts", description = "Contact CRUD")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        for expected in ["/register", "/login", "/contacts/", "/contacts/{id}"] {
            assert!(
                paths.iter().any(|p| p == expected),
                "missing path {expected} in {paths:?}"
            );
        }
    }
}
