//! # instalike-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Comment, Entity, EntityId, EntityRef, Identity, Like, Notification, Post, User};
pub use error::{DomainError, DomainResult};
pub use events::DomainEvent;
pub use traits::{
    NotificationRepository, PostRepository, RepoResult, RepositoryError, UserRepository,
};
pub use value_objects::{
    Argon2Scheme, CredentialScheme, Email, FullName, Nickname, Password, Picture, PostText,
    Snowflake, SnowflakeGenerator, SnowflakeParseError,
};
