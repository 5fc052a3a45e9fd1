//! Session token issuance and verification. Tokens are `HS256` JWTs carrying
//! the user id, signed with the configured secret and valid for the session
//! TTL. Nothing is persisted server-side; validity is signature plus expiry
//! at the point the token is read.

use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default session lifetime of 30 days, in seconds.
pub const DEFAULT_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Claims embedded in a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiration, unix seconds.
    pub exp: i64,
}

impl Claims {
    /// Parses the subject back into a user id.
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).context("token subject is not a valid user id")
    }
}

/// Signs a session token for the given user id.
pub fn issue(user_id: Uuid, secret: &SecretString, ttl_seconds: i64) -> Result<String> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + ttl_seconds,
    };

    let key = EncodingKey::from_secret(secret.expose_secret().as_bytes());

    encode(&Header::default(), &claims, &key).context("failed to sign session token")
}

/// Verifies signature and expiry, returning the embedded claims.
///
/// Any failure (bad signature, malformed token, expired) is an `Err`; callers
/// treat all of them as "no valid session".
pub fn verify(token: &str, secret: &SecretString) -> Result<Claims> {
    let key = DecodingKey::from_secret(secret.expose_secret().as_bytes());

    let data = decode::<Claims>(token, &key, &Validation::default())
        .context("session token rejected")?;

    Ok(data.claims)
}
