//! Database helpers for user records.

use anyhow::{Context, Result};
use sqlx::Row;
use tracing::Instrument;
use uuid::Uuid;

use super::{is_unique_violation, UserStore};
use crate::password;

/// A user record in its default projection, without the password hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

/// Login projection of a user row: the id and the password hash, nothing
/// more. Only the login path asks for this.
pub struct UserCredentials {
    pub id: Uuid,
    pub password_hash: String,
}

/// Outcome when attempting to create a new user.
#[derive(Debug)]
pub enum SignupOutcome {
    Created(User),
    Conflict,
}

/// Lowercase and trim an email before storage or lookup.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserStore {
    /// Creates a user, hashing the password at persistence time.
    ///
    /// A duplicate email resolves to [`SignupOutcome::Conflict`] via the
    /// unique constraint; nothing is written in that case.
    ///
    /// # Errors
    /// Returns an error when hashing or the insert fails for any other
    /// reason.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<SignupOutcome> {
        let email = normalize_email(email);
        let password_hash = password::hash(password)?;

        let query = r"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(username)
            .bind(&email)
            .bind(&password_hash)
            .fetch_one(self.pool())
            .instrument(span)
            .await;

        match row {
            Ok(row) => Ok(SignupOutcome::Created(User {
                id: row.get("id"),
                username: username.to_string(),
                email,
            })),
            Err(err) if is_unique_violation(&err) => Ok(SignupOutcome::Conflict),
            Err(err) => Err(err).context("failed to insert user"),
        }
    }

    /// Looks up login data by email, password hash included.
    ///
    /// # Errors
    /// Returns an error when the query fails.
    pub async fn find_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        let email = normalize_email(email);

        let query = "SELECT id, password_hash FROM users WHERE email = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(&email)
            .fetch_optional(self.pool())
            .instrument(span)
            .await
            .context("failed to lookup user credentials")?;

        Ok(row.map(|row| UserCredentials {
            id: row.get("id"),
            password_hash: row.get("password_hash"),
        }))
    }

    /// Fetches a user by id in the default projection.
    ///
    /// # Errors
    /// Returns an error when the query fails.
    pub async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let query = "SELECT id, username, email FROM users WHERE id = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(self.pool())
            .instrument(span)
            .await
            .context("failed to lookup user by id")?;

        Ok(row.map(|row| User {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
        }))
    }

    /// Checks whether an account exists for the given email.
    ///
    /// # Errors
    /// Returns an error when the query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let email = normalize_email(email);

        let query = "SELECT 1 FROM users WHERE email = $1 LIMIT 1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(&email)
            .fetch_optional(self.pool())
            .instrument(span)
            .await
            .context("failed to lookup user by email")?;

        Ok(row.is_some())
    }

    /// Deletes every user record, returning the number of rows removed.
    ///
    /// # Errors
    /// Returns an error when the delete fails.
    pub async fn delete_all_users(&self) -> Result<u64> {
        let query = "DELETE FROM users";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "DELETE",
            db.statement = query
        );
        let result = sqlx::query(query)
            .execute(self.pool())
            .instrument(span)
            .await
            .context("failed to delete users")?;

        Ok(result.rows_affected())
    }
}
