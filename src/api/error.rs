//! Unified error handling for the auth API. Every handler failure is a
//! variant here, mapped to a status and a short generic body exactly once.
//! Internal detail stays in the server logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or empty required field.
    #[error("{0}")]
    Validation(String),

    /// Unknown account or wrong password. One message for both so the
    /// responses stay indistinguishable.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Operation refused in this environment.
    #[error("{0}")]
    Forbidden(String),

    /// Duplicate email on signup.
    #[error("{0}")]
    Conflict(String),

    /// Token signing failed. The cause is logged, never sent to the client.
    #[error("Error creating authentication token")]
    Token(anyhow::Error),

    /// Store failure, with the client-safe message as the first field.
    #[error("{0}")]
    Store(&'static str, anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Store(_, source) => error!("Store error: {source:#}"),
            Self::Token(source) => error!("Token error: {source:#}"),
            _ => {}
        }

        let status = match &self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Token(_) | Self::Store(_, _) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}
