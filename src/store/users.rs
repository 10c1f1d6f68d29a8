//! In-memory identity store

use crate::auth::models::User;
use crate::error::{Error, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Registration input, validated before it reaches the store
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Identity persistence collaborator.
///
/// Process-local map keyed by user id. Constraint violations surface as the
/// crate error taxonomy directly, so nothing storage-specific reaches the
/// HTTP boundary.
pub struct UserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

/// Unknown email and wrong password report identically.
const BAD_CREDENTIALS: &str = "Invalid email or password";

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a new member account.
    ///
    /// Emails are unique case-insensitively; duplicates are a conflict.
    pub async fn register(&self, new_user: NewUser) -> Result<User> {
        let email = new_user.email.to_lowercase();

        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == email) {
            return Err(Error::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        let password_hash = hash(&new_user.password, DEFAULT_COST)?;
        let user = User::new(
            email,
            new_user.first_name,
            new_user.last_name,
            password_hash,
        );
        users.insert(user.id.clone(), user.clone());

        tracing::info!(user_id = %user.id, "registered new account");
        Ok(user)
    }

    /// Check credentials for login
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let email = email.to_lowercase();

        let users = self.users.read().await;
        let user = users
            .values()
            .find(|u| u.email == email)
            .ok_or_else(|| Error::Unauthenticated(BAD_CREDENTIALS.to_string()))?;

        if !user.can_sign_in() {
            return Err(Error::Unauthenticated(BAD_CREDENTIALS.to_string()));
        }

        if !verify(password, &user.password_hash)? {
            return Err(Error::Unauthenticated(BAD_CREDENTIALS.to_string()));
        }

        Ok(user.clone())
    }

    pub async fn find_by_id(&self, id: &str) -> Option<User> {
        self.users.read().await.get(id).cloned()
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let email = email.to_lowercase();
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Test hook: flip the active flag on an account
    #[cfg(test)]
    pub async fn set_active(&self, id: &str, active: bool) {
        if let Some(user) = self.users.write().await.get_mut(id) {
            user.active = active;
        }
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for UserStore {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
        }
    }
}
