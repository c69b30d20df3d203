//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use thiserror::Error;

use crate::entities::{Notification, Post, User};
use crate::value_objects::{Email, Nickname, Snowflake};

/// Failure of the storage behind a repository
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("{entity} with id {id} does not exist")]
    Missing { entity: &'static str, id: Snowflake },

    #[error("Duplicate {field}: {value}")]
    Duplicate { field: &'static str, value: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepositoryError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by nickname
    async fn find_by_nickname(&self, nickname: &Nickname) -> RepoResult<Option<User>>;

    /// Check if nickname is already taken
    async fn nickname_exists(&self, nickname: &Nickname) -> RepoResult<bool>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &Email) -> RepoResult<bool>;

    /// Insert or update a user
    ///
    /// Transient users receive a fresh id, which is written back into `user`.
    async fn save(&self, user: &mut User) -> RepoResult<Snowflake>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// List posts of an author, newest first
    async fn find_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Post>>;

    /// Insert or update a post together with its likes and comments
    async fn save(&self, post: &mut Post) -> RepoResult<Snowflake>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Find notification by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>>;

    /// List notifications addressed to a user, newest first
    async fn find_by_recipient(&self, recipient_id: Snowflake) -> RepoResult<Vec<Notification>>;

    /// Insert or update a notification
    async fn save(&self, notification: &mut Notification) -> RepoResult<Snowflake>;
}
