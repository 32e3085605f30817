//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST surface: the greeter, the callable deletion operation, and the
//! health probes. The generated specification backs Swagger UI in debug
//! builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{DeleteUserRequest, DeletionOutcome, DomainError, ErrorCode};

/// Enrich the generated document with the auth-proxy header scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "AuthProxyUid",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-Authenticated-Uid",
                "Verified account id injected by the platform's auth proxy.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Account administration backend API",
        description = "Fixed greeting endpoint and admin-gated account deletion."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("AuthProxyUid" = [])),
    paths(
        crate::inbound::http::greeter::hello,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(DeleteUserRequest, DeletionOutcome, DomainError, ErrorCode)),
    tags(
        (name = "greeter", description = "Fixed greeting"),
        (name = "users", description = "Account administration operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
