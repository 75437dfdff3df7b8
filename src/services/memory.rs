//! In-memory identity store.
//!
//! Used when no `DATABASE_URL` is configured and as the backing store for
//! route and service tests. Sessions and confirmation codes never expire;
//! everything is lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::session::{SessionUser, generate_token};
use super::store::{IdentityStore, StoreError, UserRecord};

#[derive(Default)]
pub struct MemoryIdentityStore {
    /// Users keyed by normalized email.
    users: RwLock<HashMap<String, UserRecord>>,
    /// Session token -> user id.
    sessions: RwLock<HashMap<String, Uuid>>,
    /// User id -> hashed confirmation code.
    confirmations: RwLock<HashMap<Uuid, String>>,
}

impl MemoryIdentityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn create_session(&self, user_id: Uuid) -> Result<String, StoreError> {
        let token = generate_token();
        self.sessions.write().await.insert(token.clone(), user_id);
        Ok(token)
    }

    async fn validate_session(&self, token: &str) -> Result<Option<SessionUser>, StoreError> {
        let Some(user_id) = self.sessions.read().await.get(token).copied() else {
            return Ok(None);
        };
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.id == user_id).map(UserRecord::session_user))
    }

    async fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }

    async fn create_email_confirmation(&self, user_id: Uuid, code_hash: &str) -> Result<(), StoreError> {
        self.confirmations.write().await.insert(user_id, code_hash.to_owned());
        Ok(())
    }

    async fn confirm_email(&self, user_id: Uuid, code_hash: &str) -> Result<bool, StoreError> {
        let mut confirmations = self.confirmations.write().await;
        if confirmations.get(&user_id).map(String::as_str) != Some(code_hash) {
            return Ok(false);
        }
        confirmations.remove(&user_id);

        let mut users = self.users.write().await;
        match users.values_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.email_confirmed = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
