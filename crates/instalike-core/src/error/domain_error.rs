//! Domain errors - expected failures of value-object validation and business rules
//!
//! Every fallible domain operation returns [`DomainResult`]. An `Err` is an
//! outcome the caller is expected to handle (for example by showing the
//! message to the user); it never signals a programming error.

use thiserror::Error;

/// Failure outcome of a domain operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid nickname: {0}")]
    InvalidNickname(String),

    #[error("Invalid full name: {0}")]
    InvalidFullName(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Invalid picture: {0}")]
    InvalidPicture(String),

    #[error("Invalid comment: {0}")]
    InvalidComment(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Follow graph
    // =========================================================================
    #[error("User [{nickname}] cannot follow themselves.")]
    CannotFollowSelf { nickname: String },

    #[error("User [{follower}] is already following [{followed}].")]
    AlreadyFollowing { follower: String, followed: String },

    #[error("User [{follower}] is not following [{followed}].")]
    NotFollowing { follower: String, followed: String },

    // =========================================================================
    // Likes
    // =========================================================================
    #[error("User [{nickname}] cannot put a 'Like' on their own posts.")]
    CannotLikeOwnPost { nickname: String },

    #[error("User [{nickname}] has already put a 'Like' to this post.")]
    AlreadyLiked { nickname: String },

    #[error("User [{nickname}] did not put any 'Like' on this post.")]
    LikeNotFound { nickname: String },

    // =========================================================================
    // Credentials
    // =========================================================================
    #[error("Password hashing failed: {0}")]
    PasswordHashing(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidNickname(_) => "INVALID_NICKNAME",
            Self::InvalidFullName(_) => "INVALID_FULL_NAME",
            Self::InvalidEmail(_) => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::InvalidPicture(_) => "INVALID_PICTURE",
            Self::InvalidComment(_) => "INVALID_COMMENT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            Self::CannotFollowSelf { .. } => "CANNOT_FOLLOW_SELF",
            Self::AlreadyFollowing { .. } => "ALREADY_FOLLOWING",
            Self::NotFollowing { .. } => "NOT_FOLLOWING",

            Self::CannotLikeOwnPost { .. } => "CANNOT_LIKE_OWN_POST",
            Self::AlreadyLiked { .. } => "ALREADY_LIKED",
            Self::LikeNotFound { .. } => "LIKE_NOT_FOUND",

            Self::PasswordHashing(_) => "PASSWORD_HASHING_FAILED",
        }
    }

    /// Check if this is a value-object validation failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidNickname(_)
                | Self::InvalidFullName(_)
                | Self::InvalidEmail(_)
                | Self::WeakPassword(_)
                | Self::InvalidPicture(_)
                | Self::InvalidComment(_)
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this failure reports a request that is redundant with current state
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyFollowing { .. } | Self::AlreadyLiked { .. }
        )
    }

    /// Check if this is a violated business rule on an aggregate
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::CannotFollowSelf { .. }
                | Self::AlreadyFollowing { .. }
                | Self::NotFollowing { .. }
                | Self::CannotLikeOwnPost { .. }
                | Self::AlreadyLiked { .. }
                | Self::LikeNotFound { .. }
        )
    }
}

/// Outcome of a domain operation
pub type DomainResult<T> = Result<T, DomainError>;
