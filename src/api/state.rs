//! Auth configuration shared through router extensions.

use secrecy::SecretString;

use crate::token::DEFAULT_TTL_SECONDS;

/// Deployment environment. Production refuses the administrative
/// clear-users operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "invalid environment: {other} (expected development or production)"
            )),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    base_url: String,
    session_ttl_seconds: i64,
    token_secret: SecretString,
    environment: Environment,
}

impl AuthConfig {
    #[must_use]
    pub fn new(base_url: String, token_secret: SecretString) -> Self {
        Self {
            base_url,
            session_ttl_seconds: DEFAULT_TTL_SECONDS,
            token_secret,
            environment: Environment::Development,
        }
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub fn token_secret(&self) -> &SecretString {
        &self.token_secret
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Only mark cookies secure when the site is served over HTTPS.
    #[must_use]
    pub fn session_cookie_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}
