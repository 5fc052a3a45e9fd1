//! Login: credential lookup, password verification, token issuance, and the
//! session cookie.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use super::types::{LoginRequest, LoginResponse};
use crate::api::error::ApiError;
use crate::api::session::session_cookie;
use crate::api::state::AuthConfig;
use crate::password;
use crate::store::UserStore;
use crate::token;

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = LoginResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid email or password"),
        (status = 500, description = "Store or token failure")
    ),
    tag = "auth"
)]
pub async fn login(
    store: Extension<UserStore>,
    config: Extension<Arc<AuthConfig>>,
    payload: Option<Json<LoginRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::Validation("Missing payload".to_string()));
    };

    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    // Password hash is excluded from the default projection; ask for it.
    let credentials = store
        .find_credentials_by_email(&request.email)
        .await
        .map_err(|err| ApiError::Store("Error finding user", err))?
        .ok_or(ApiError::InvalidCredentials)?;

    let matches = password::verify(&request.password, &credentials.password_hash)
        .map_err(|err| ApiError::Store("Error verifying password", err))?;

    if !matches {
        debug!("Password mismatch for known account");
        return Err(ApiError::InvalidCredentials);
    }

    let token = token::issue(
        credentials.id,
        config.token_secret(),
        config.session_ttl_seconds(),
    )
    .map_err(ApiError::Token)?;

    // Refetch without the hash for the response body.
    let user = store
        .find_user_by_id(credentials.id)
        .await
        .map_err(|err| ApiError::Store("Error retrieving user data", err))?
        .ok_or(ApiError::InvalidCredentials)?;

    let cookie =
        session_cookie(&config, &token).map_err(|err| ApiError::Token(anyhow::Error::new(err)))?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    debug!("Login successful for {}", user.id);

    Ok((
        StatusCode::OK,
        headers,
        Json(LoginResponse {
            success: true,
            user: user.into(),
        }),
    ))
}
