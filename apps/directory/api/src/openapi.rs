//! OpenAPI documentation configuration

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie scheme and the login endpoint.
struct SessionAddon;

impl Modify for SessionAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.merge(domain_users::auth_handlers::ApiDoc::openapi());

        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "id",
                "Signed session cookie set by POST /login.",
            ))),
        );
    }
}

/// Combined OpenAPI documentation for the Directory API
#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionAddon),
    info(
        title = "Directory API",
        version = "0.1.0",
        description = "In-memory user directory behind a session login"
    ),
    servers(
        (url = "http://localhost:5600", description = "Local development server")
    ),
    nest(
        (path = "/user", api = domain_users::handlers::ApiDoc)
    ),
    tags(
        (name = "Users", description = "User directory endpoints"),
        (name = "Auth", description = "Session login")
    )
)]
pub struct ApiDoc;
