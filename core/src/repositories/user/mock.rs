//! In-memory implementation of UserRepository
//!
//! Backs unit tests and local runs without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult};
use crate::services::otp::AccountDirectory;

use super::trait_::UserRepository;

/// In-memory user repository keyed by email
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MockUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a repository pre-populated with `users`
    pub fn with_users(users: Vec<User>) -> Self {
        let users = users.into_iter().map(|u| (u.email.clone(), u)).collect();
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountDirectory for MockUserRepository {
    async fn is_active(&self, email: &str) -> DomainResult<bool> {
        let users = self.users.read().await;
        Ok(users.get(email).map_or(false, |u| u.is_active))
    }

    async fn activate(&self, email: &str) -> DomainResult<()> {
        let mut users = self.users.write().await;
        match users.get_mut(email) {
            Some(user) => {
                user.activate();
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: "User".to_string(),
            }),
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.email) {
            return Err(DomainError::Validation {
                message: "Email already registered".to_string(),
            });
        }

        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    async fn update_password_hash(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(email) {
            Some(user) => {
                user.set_password_hash(password_hash.to_string());
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: "User".to_string(),
            }),
        }
    }
}
