//! Infrastructure layer - External systems integration
//!
//! Database connection management and the repository implementation the
//! service is wired with.

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
