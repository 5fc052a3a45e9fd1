//! OpenAPI document for the auth API.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{clear_users, forgot_password, health, login, logout, signup, types};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        signup::signup,
        login::login,
        logout::logout,
        forgot_password::forgot_password,
        clear_users::clear_users
    ),
    components(schemas(
        health::Health,
        types::SignupRequest,
        types::LoginRequest,
        types::ForgotPasswordRequest,
        types::UserPayload,
        types::SignupResponse,
        types::LoginResponse,
        types::MessageResponse
    )),
    tags(
        (name = "auth", description = "Signup, login, logout and password reset"),
        (name = "admin", description = "Administrative operations"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Interactive docs at `/swagger-ui`, document at `/api-docs/openapi.json`.
pub(crate) fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};

    #[test]
    fn test_openapi_document_lists_routes() -> Result<()> {
        let doc = serde_json::to_value(openapi())?;
        let paths = doc.get("paths").context("missing paths")?;

        for route in [
            "/health",
            "/api/auth/signup",
            "/api/auth/login",
            "/api/auth/logout",
            "/api/auth/forgot-password",
            "/api/auth/clear-users",
        ] {
            assert!(paths.get(route).is_some(), "missing route {route}");
        }
        Ok(())
    }
}
