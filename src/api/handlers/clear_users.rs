//! Administrative clear-users: deletes every user record. Refused outside
//! development so a deployed instance cannot be wiped through the API.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use super::types::MessageResponse;
use crate::api::error::ApiError;
use crate::api::state::AuthConfig;
use crate::store::UserStore;

#[utoipa::path(
    post,
    path = "/api/auth/clear-users",
    responses(
        (status = 200, description = "All user records deleted", body = MessageResponse),
        (status = 403, description = "Refused in this environment"),
        (status = 500, description = "Store failure")
    ),
    tag = "admin"
)]
pub async fn clear_users(
    store: Extension<UserStore>,
    config: Extension<Arc<AuthConfig>>,
) -> Result<impl IntoResponse, ApiError> {
    if config.environment().is_production() {
        return Err(ApiError::Forbidden(
            "Not available in this environment".to_string(),
        ));
    }

    let removed = store
        .delete_all_users()
        .await
        .map_err(|err| ApiError::Store("Error clearing users", err))?;

    info!("Cleared {removed} user records");

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            success: true,
            message: "All users cleared".to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::Environment;
    use crate::store::test_support::unreachable_pool;
    use secrecy::SecretString;

    fn test_store() -> Extension<UserStore> {
        Extension(UserStore::from_pool(unreachable_pool()))
    }

    fn config_for(environment: Environment) -> Extension<Arc<AuthConfig>> {
        Extension(Arc::new(
            AuthConfig::new(
                "http://localhost:8080".to_string(),
                SecretString::from("test-signing-secret"),
            )
            .with_environment(environment),
        ))
    }

    #[tokio::test]
    async fn test_clear_users_refused_in_production() {
        // Refusal happens before any store access, so the unreachable pool
        // must not matter here.
        let response = clear_users(test_store(), config_for(Environment::Production))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_clear_users_store_failure_is_500() {
        let response = clear_users(test_store(), config_for(Environment::Development))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
