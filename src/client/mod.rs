//! Typed consumer for the auth API: a transport abstraction plus a session
//! manager that mirrors what a browser front end keeps in memory. The
//! manager hydrates persisted session metadata once, keeps it in sync across
//! login, signup, logout and reset, and never stores the token itself; the
//! cookie stays with the transport.

pub mod http;

pub use http::HttpTransport;

pub use crate::api::handlers::types::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, SignupRequest,
    SignupResponse, UserPayload,
};

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status and this message.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The request never got a usable answer.
    #[error("transport error: {0}")]
    Transport(anyhow::Error),
}

/// Wire operations the session manager needs.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, ClientError>;
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError>;
    async fn logout(&self) -> Result<MessageResponse, ClientError>;
    async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<MessageResponse, ClientError>;
}

/// Where the manager persists non-sensitive user metadata between runs.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<UserPayload>;
    fn save(&self, user: &UserPayload);
    fn clear(&self);
}

/// In-process store, the default for tools and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    user: Mutex<Option<UserPayload>>,
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<UserPayload> {
        self.user.lock().map_or(None, |user| user.clone())
    }

    fn save(&self, user: &UserPayload) {
        if let Ok(mut slot) = self.user.lock() {
            *slot = Some(user.clone());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.user.lock() {
            *slot = None;
        }
    }
}

/// Client-side session lifecycle around an [`AuthTransport`].
pub struct SessionManager<T, S> {
    transport: T,
    store: S,
    user: Option<UserPayload>,
    initialized: bool,
}

impl<T: AuthTransport, S: SessionStore> SessionManager<T, S> {
    pub fn new(transport: T, store: S) -> Self {
        Self {
            transport,
            store,
            user: None,
            initialized: false,
        }
    }

    /// Loads the persisted user. Runs once; later calls are no-ops so a
    /// hydrate cannot clobber state from a login that already happened.
    pub fn hydrate(&mut self) {
        if self.initialized {
            return;
        }

        self.user = self.store.load();
        self.initialized = true;
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserPayload> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Logs in and remembers the returned user.
    ///
    /// # Errors
    /// Returns the server's error message on rejection, or a transport error.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .transport
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        self.store.save(&response.user);
        self.user = Some(response.user);
        self.initialized = true;

        Ok(())
    }

    /// Creates an account, then logs in with the same credentials so the
    /// session cookie is set right away.
    ///
    /// # Errors
    /// Returns the first failing step's error.
    pub async fn signup(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        self.transport
            .signup(&SignupRequest {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        self.login(email, password).await
    }

    /// Ends the session. Local state is dropped before the request goes out,
    /// an unreachable server must not keep a session alive.
    ///
    /// # Errors
    /// Returns the transport error, after local state is already cleared.
    pub async fn logout(&mut self) -> Result<MessageResponse, ClientError> {
        self.store.clear();
        self.user = None;
        self.initialized = true;

        self.transport.logout().await
    }

    /// Asks for password reset instructions.
    ///
    /// # Errors
    /// Returns the server's error message on rejection, or a transport error.
    pub async fn reset_password(&mut self, email: &str) -> Result<String, ClientError> {
        let response = self
            .transport
            .forgot_password(&ForgotPasswordRequest {
                email: email.to_string(),
            })
            .await?;

        Ok(response.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn user() -> UserPayload {
        UserPayload {
            id: "1f4b5c0a-8f4e-4d9f-9c59-0a1c9e1f2a3b".to_string(),
            username: "ferris".to_string(),
            email: "ferris@example.com".to_string(),
        }
    }

    #[derive(Default)]
    struct FakeTransport {
        calls: Mutex<Vec<&'static str>>,
        reject_login: bool,
        fail_logout: bool,
    }

    impl FakeTransport {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AuthTransport for FakeTransport {
        async fn signup(&self, _request: &SignupRequest) -> Result<SignupResponse, ClientError> {
            self.calls.lock().unwrap().push("signup");
            Ok(SignupResponse {
                success: true,
                user: user(),
            })
        }

        async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
            self.calls.lock().unwrap().push("login");
            if self.reject_login {
                return Err(ClientError::Api {
                    status: StatusCode::UNAUTHORIZED,
                    message: "Invalid email or password".to_string(),
                });
            }
            assert_eq!(request.email, "ferris@example.com");
            Ok(LoginResponse {
                success: true,
                user: user(),
            })
        }

        async fn logout(&self) -> Result<MessageResponse, ClientError> {
            self.calls.lock().unwrap().push("logout");
            if self.fail_logout {
                return Err(ClientError::Transport(anyhow!("connection refused")));
            }
            Ok(MessageResponse {
                success: true,
                message: "Logout successful".to_string(),
            })
        }

        async fn forgot_password(
            &self,
            _request: &ForgotPasswordRequest,
        ) -> Result<MessageResponse, ClientError> {
            self.calls.lock().unwrap().push("forgot_password");
            Ok(MessageResponse {
                success: true,
                message: "Password reset instructions sent to your email".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_signup_logs_in_right_away() {
        let mut manager = SessionManager::new(FakeTransport::default(), MemoryStore::default());

        manager
            .signup("ferris", "ferris@example.com", "s3cret")
            .await
            .unwrap();

        assert_eq!(manager.transport.calls(), vec!["signup", "login"]);
        assert!(manager.is_authenticated());
        assert_eq!(manager.user().unwrap().username, "ferris");
        assert!(manager.store.load().is_some());
    }

    #[tokio::test]
    async fn test_login_rejection_surfaces_server_message() {
        let transport = FakeTransport {
            reject_login: true,
            ..FakeTransport::default()
        };
        let mut manager = SessionManager::new(transport, MemoryStore::default());

        let err = manager
            .login("ferris@example.com", "wrong")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid email or password");
        assert!(!manager.is_authenticated());
        assert!(manager.store.load().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_when_transport_fails() {
        let transport = FakeTransport {
            fail_logout: true,
            ..FakeTransport::default()
        };
        let mut manager = SessionManager::new(transport, MemoryStore::default());
        manager.login("ferris@example.com", "s3cret").await.unwrap();
        assert!(manager.is_authenticated());

        let result = manager.logout().await;

        assert!(result.is_err());
        assert!(!manager.is_authenticated());
        assert!(manager.store.load().is_none());
    }

    #[tokio::test]
    async fn test_hydrate_runs_once() {
        let store = MemoryStore::default();
        store.save(&user());

        let mut manager = SessionManager::new(FakeTransport::default(), store);
        manager.hydrate();
        assert!(manager.is_authenticated());

        manager.store.clear();
        manager.hydrate();
        assert!(manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_reset_password_returns_message() {
        let mut manager = SessionManager::new(FakeTransport::default(), MemoryStore::default());

        let message = manager.reset_password("ferris@example.com").await.unwrap();

        assert_eq!(message, "Password reset instructions sent to your email");
        assert!(!manager.is_authenticated());
    }
}
