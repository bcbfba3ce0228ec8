use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{User, Users};

/// Repository trait for User persistence
///
/// Implementations are shared across concurrent requests and handle their
/// own locking or transaction discipline.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by email, `NotFound` if absent
    async fn find_by_email(&self, email: &str) -> UserResult<User>;

    /// List all users in a stable order
    async fn find_all(&self) -> UserResult<Users>;

    /// Insert a new user, `Conflict` if the email is taken
    async fn save(&self, user: &User) -> UserResult<User>;

    /// Replace the user currently stored under `email`
    async fn update_user(&self, user: &User, email: &str) -> UserResult<User>;

    /// Remove the user stored under `email` and return it
    async fn delete_user(&self, email: &str) -> UserResult<User>;
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Keeps insertion order, so listings are stable between writes.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `users`, in order.
    pub fn with_users(users: Users) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> UserResult<User> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| UserError::NotFound(email.to_string()))
    }

    async fn find_all(&self) -> UserResult<Users> {
        let users = self.users.read().await;
        Ok(users.clone())
    }

    async fn save(&self, user: &User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::Conflict(user.email.clone()));
        }

        users.push(user.clone());

        tracing::info!(email = %user.email, role = %user.role, "Created user");
        Ok(user.clone())
    }

    async fn update_user(&self, user: &User, email: &str) -> UserResult<User> {
        let mut users = self.users.write().await;

        let email_taken = user.email != email && users.iter().any(|u| u.email == user.email);
        if email_taken {
            return Err(UserError::Conflict(user.email.clone()));
        }

        let slot = users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or_else(|| UserError::NotFound(email.to_string()))?;
        *slot = user.clone();

        tracing::info!(email = %email, new_email = %user.email, "Updated user");
        Ok(user.clone())
    }

    async fn delete_user(&self, email: &str) -> UserResult<User> {
        let mut users = self.users.write().await;

        let index = users
            .iter()
            .position(|u| u.email == email)
            .ok_or_else(|| UserError::NotFound(email.to_string()))?;
        let removed = users.remove(index);

        tracing::info!(email = %email, "Deleted user");
        Ok(removed)
    }
}
