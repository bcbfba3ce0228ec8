use std::sync::Arc;

use crate::error::UserResult;
use crate::models::{User, Users};
use crate::repository::UserRepository;

/// Service layer for users
///
/// Forwards to the repository without transforming inputs or results.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> UserResult<User> {
        self.repository.find_by_email(email).await
    }

    pub async fn find_all(&self) -> UserResult<Users> {
        self.repository.find_all().await
    }

    pub async fn save(&self, user: &User) -> UserResult<User> {
        self.repository.save(user).await
    }

    pub async fn update_user(&self, user: &User, email: &str) -> UserResult<User> {
        self.repository.update_user(user, email).await
    }

    pub async fn delete_user(&self, email: &str) -> UserResult<User> {
        self.repository.delete_user(email).await
    }
}
