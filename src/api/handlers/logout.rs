//! Logout: clears the session cookie. Nothing is stored server-side, so
//! there is no record to delete and the operation is idempotent.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::types::MessageResponse;
use crate::api::session::clear_session_cookie;
use crate::api::state::AuthConfig;

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse)
    ),
    tag = "auth"
)]
pub async fn logout(config: Extension<Arc<AuthConfig>>) -> impl IntoResponse {
    // Always clear the cookie, whether or not one was sent.
    let mut headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie(&config) {
        headers.insert(SET_COOKIE, cookie);
    }

    (
        StatusCode::OK,
        headers,
        Json(MessageResponse {
            success: true,
            message: "Logout successful".to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use secrecy::SecretString;

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let config = Extension(Arc::new(AuthConfig::new(
            "http://localhost:8080".to_string(),
            SecretString::from("test-signing-secret"),
        )));
        let response = logout(config).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(cookie.starts_with("token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
