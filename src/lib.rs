//! # Portier
//!
//! `portier` is a minimal username/password authentication service for a
//! single-page web application: signup, login, logout, a password-reset stub,
//! and an administrative clear-users operation, backed by `PostgreSQL`.
//!
//! ## Sessions
//!
//! A successful login issues a signed, time-limited token (`JWT`, `HS256`)
//! embedding the user id, delivered in an `HttpOnly`, `SameSite=Strict`
//! cookie named `token` with a 30-day lifetime. The token is not persisted
//! server-side; validity is signature plus expiry at the point it is read.
//!
//! ## Access gating
//!
//! Page requests pass through a gate that classifies paths as public
//! (`/`, `/signup`, `/forgot-password`) or protected and redirects based on
//! session validity. An invalid or expired token is treated exactly like an
//! absent one and the stale cookie is cleared on the redirect.
//!
//! ## Enumeration resistance
//!
//! Login failures return a single generic `401` for unknown accounts and bad
//! passwords alike, and forgot-password answers with the same `200` body
//! whether or not an account exists.

pub mod api;
pub mod cli;
pub mod client;
pub mod password;
pub mod store;
pub mod token;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
