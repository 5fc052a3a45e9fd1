//! reqwest-backed transport. Keeps the session cookie in the client's
//! cookie jar, so callers never see or store the token.

use super::{AuthTransport, ClientError};
use crate::api::handlers::types::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, SignupRequest,
    SignupResponse,
};
use crate::APP_USER_AGENT;
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Builds a transport for a server base URL like `http://localhost:8080`.
    ///
    /// # Errors
    /// Returns an error when the URL does not parse or the client cannot be
    /// built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|err| ClientError::Transport(err.into()))?;

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ClientError::Transport(err.into()))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Transport(err.into()))
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await
            .map_err(|err| ClientError::Transport(err.into()))?;

        Self::read_response(response).await
    }

    async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> Result<R, ClientError> {
        let response = self
            .client
            .post(self.endpoint(path)?)
            .send()
            .await
            .map_err(|err| ClientError::Transport(err.into()))?;

        Self::read_response(response).await
    }

    async fn read_response<R: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<R, ClientError> {
        let status = response.status();

        if !status.is_success() {
            // Error bodies are {"error": "..."}; fall back to the status line.
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|value| value["error"].as_str().map(ToString::to_string))
                .unwrap_or_else(|| status.to_string());

            return Err(ClientError::Api { status, message });
        }

        response
            .json::<R>()
            .await
            .map_err(|err| ClientError::Transport(err.into()))
    }
}

#[async_trait]
impl AuthTransport for HttpTransport {
    async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, ClientError> {
        self.post_json("/api/auth/signup", request).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        self.post_json("/api/auth/login", request).await
    }

    async fn logout(&self) -> Result<MessageResponse, ClientError> {
        self.post_empty("/api/auth/logout").await
    }

    async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<MessageResponse, ClientError> {
        self.post_json("/api/auth/forgot-password", request).await
    }
}
