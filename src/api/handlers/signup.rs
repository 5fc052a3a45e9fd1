//! Signup: creates a user record. The password is hashed by the store at
//! persistence time; no session cookie is set here. Clients chain a login
//! call to establish the session.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use tracing::debug;

use super::types::{SignupRequest, SignupResponse};
use crate::api::error::ApiError;
use crate::store::{SignupOutcome, UserStore};

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = SignupResponse),
        (status = 400, description = "Missing fields or duplicate email"),
        (status = 500, description = "Store failure")
    ),
    tag = "auth"
)]
pub async fn signup(
    store: Extension<UserStore>,
    payload: Option<Json<SignupRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::Validation("Missing payload".to_string()));
    };

    if request.username.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.is_empty()
    {
        return Err(ApiError::Validation(
            "Username, email and password are required".to_string(),
        ));
    }

    let outcome = store
        .create_user(&request.username, &request.email, &request.password)
        .await
        .map_err(|err| ApiError::Store("Error creating user", err))?;

    match outcome {
        SignupOutcome::Created(user) => {
            debug!("User created: {}", user.id);
            Ok((
                StatusCode::CREATED,
                Json(SignupResponse {
                    success: true,
                    user: user.into(),
                }),
            ))
        }
        SignupOutcome::Conflict => Err(ApiError::Conflict("User already exists".to_string())),
    }
}
