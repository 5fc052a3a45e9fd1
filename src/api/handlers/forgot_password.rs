//! Forgot-password stub: validates the request and confirms nothing. The
//! response is the same whether or not an account exists, so the endpoint
//! reveals nothing about which accounts exist. No reset token is generated
//! and no email is sent.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use tracing::debug;

use super::types::{ForgotPasswordRequest, MessageResponse};
use crate::api::error::ApiError;
use crate::store::UserStore;

#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Acknowledged, account existence not disclosed", body = MessageResponse),
        (status = 400, description = "Missing email"),
        (status = 500, description = "Store failure")
    ),
    tag = "auth"
)]
pub async fn forgot_password(
    store: Extension<UserStore>,
    payload: Option<Json<ForgotPasswordRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::Validation("Missing payload".to_string()));
    };

    if request.email.trim().is_empty() {
        return Err(ApiError::Validation("Email is required".to_string()));
    }

    // The lookup runs either way; only the logs see the outcome.
    let known = store
        .email_exists(&request.email)
        .await
        .map_err(|err| ApiError::Store("Failed to process password reset request", err))?;

    if known {
        debug!("Password reset requested for a known account");
    } else {
        debug!("Password reset requested for an unknown account");
    }

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            success: true,
            message: "Password reset instructions sent to your email".to_string(),
        }),
    ))
}
