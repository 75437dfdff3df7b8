//! Persistence seam for accounts and sessions.
//!
//! TRADE-OFFS
//! ==========
//! Handlers depend on `dyn IdentityStore` rather than a pool so the account
//! routes run unchanged against Postgres in production and the in-memory
//! store in development and tests.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::session::{SessionUser, generate_token};

/// A stored account, including its credential material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    /// Normalized (trimmed, lowercased) email.
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub email_confirmed: bool,
}

impl UserRecord {
    #[must_use]
    pub fn session_user(&self) -> SessionUser {
        SessionUser { id: self.id, email: self.email.clone(), email_confirmed: self.email_confirmed }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Insert a new account. Fails with `StoreError::DuplicateEmail` if the
    /// email is taken.
    async fn insert_user(&self, user: &UserRecord) -> Result<(), StoreError>;

    /// Create a session for the given user, returning the token.
    async fn create_session(&self, user_id: Uuid) -> Result<String, StoreError>;

    /// Resolve an unexpired session token to its user.
    async fn validate_session(&self, token: &str) -> Result<Option<SessionUser>, StoreError>;

    async fn delete_session(&self, token: &str) -> Result<(), StoreError>;

    /// Record the hashed confirmation code for an account, replacing any
    /// earlier one.
    async fn create_email_confirmation(&self, user_id: Uuid, code_hash: &str) -> Result<(), StoreError>;

    /// Consume a matching, unexpired confirmation code and mark the account
    /// confirmed. Returns `false` when nothing matched.
    async fn confirm_email(&self, user_id: Uuid, code_hash: &str) -> Result<bool, StoreError>;
}

/// Postgres-backed store using the `users` and `sessions` tables.
#[derive(Clone)]
pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, email_confirmed FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| UserRecord {
            id: r.get("id"),
            email: r.get("email"),
            password_hash: r.get("password_hash"),
            email_confirmed: r.get("email_confirmed"),
        }))
    }

    async fn insert_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        let result = sqlx::query(
            r"INSERT INTO users (id, email, password_hash, email_confirmed)
              VALUES ($1, $2, $3, $4)
              ON CONFLICT (email) DO NOTHING",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.email_confirmed)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::DuplicateEmail);
        }
        Ok(())
    }

    async fn create_session(&self, user_id: Uuid) -> Result<String, StoreError> {
        let token = generate_token();
        sqlx::query("INSERT INTO sessions (token, user_id) VALUES ($1, $2)")
            .bind(&token)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(token)
    }

    async fn validate_session(&self, token: &str) -> Result<Option<SessionUser>, StoreError> {
        let row = sqlx::query(
            r"SELECT u.id, u.email, u.email_confirmed
              FROM sessions s
              JOIN users u ON u.id = s.user_id
              WHERE s.token = $1 AND s.expires_at > now()",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| SessionUser { id: r.get("id"), email: r.get("email"), email_confirmed: r.get("email_confirmed") }))
    }

    async fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn create_email_confirmation(&self, user_id: Uuid, code_hash: &str) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO email_confirmations (user_id, code_hash)
              VALUES ($1, $2)
              ON CONFLICT (user_id) DO UPDATE
              SET code_hash = EXCLUDED.code_hash,
                  created_at = now(),
                  expires_at = now() + INTERVAL '1 day'",
        )
        .bind(user_id)
        .bind(code_hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn confirm_email(&self, user_id: Uuid, code_hash: &str) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;

        let consumed = sqlx::query(
            r"DELETE FROM email_confirmations
              WHERE user_id = $1 AND code_hash = $2 AND expires_at > now()",
        )
        .bind(user_id)
        .bind(code_hash)
        .execute(&mut *tx)
        .await?;

        if consumed.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("UPDATE users SET email_confirmed = TRUE WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
