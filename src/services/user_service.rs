//! User access service - use cases for the user resource.
//!
//! Mediates between HTTP handlers and the entity store; the only
//! business rule is existence-checking on reads. Store and descriptor
//! are injected at construction and the service holds no mutable state.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Descriptor;
use crate::domain::{NewUser, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Static descriptor for the user resource.
    ///
    /// Infallible and identical across calls, regardless of store state.
    fn descriptor(&self) -> Arc<Descriptor>;

    /// Get user by ID
    async fn get_user(&self, id: i64) -> AppResult<User>;

    /// Create a user from caller-supplied fields.
    ///
    /// The password, when present, is hashed before the record reaches
    /// the store. The store assigns the identifier.
    async fn create_user(
        &self,
        name: String,
        email: Option<String>,
        password: Option<String>,
    ) -> AppResult<User>;
}

/// Concrete implementation of UserService backed by a repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    descriptor: Arc<Descriptor>,
}

impl UserManager {
    /// Create new user service instance with its store and descriptor
    pub fn new(repo: Arc<dyn UserRepository>, descriptor: Arc<Descriptor>) -> Self {
        Self { repo, descriptor }
    }
}

#[async_trait]
impl UserService for UserManager {
    fn descriptor(&self) -> Arc<Descriptor> {
        self.descriptor.clone()
    }

    async fn get_user(&self, id: i64) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn create_user(
        &self,
        name: String,
        email: Option<String>,
        password: Option<String>,
    ) -> AppResult<User> {
        // Plaintext stops here; only the hash travels on
        let password_hash = match password {
            Some(plain) => Some(Password::new(&plain)?.into_string()),
            None => None,
        };

        self.repo
            .save(NewUser {
                name,
                email,
                password_hash,
            })
            .await
    }
}
