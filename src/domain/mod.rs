//! Domain layer - Core business entities and logic
//!
//! Core models for the user resource, independent of infrastructure
//! concerns. Contains the entity, the store-facing record, and the
//! password value object.

pub mod password;
pub mod user;

pub use password::Password;
pub use user::{NewUser, User, UserResponse};
