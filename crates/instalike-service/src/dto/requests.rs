//! Request DTOs for use cases
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Pictures travel as base64 text, as posted by browser forms.

use instalike_core::Snowflake;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Account Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, max = 30, message = "Nickname must be 1-30 characters"))]
    pub nickname: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Surname must be 1-100 characters"))]
    pub surname: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(length(max = 1000, message = "Biography must be at most 1000 characters"))]
    #[serde(default)]
    pub biography: Option<String>,

    /// Base64 picture, or none for the default one
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Nickname is required"))]
    pub nickname: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Profile edit request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditUserDetailsRequest {
    pub user_id: Snowflake,

    #[validate(length(min = 1, max = 30, message = "Nickname must be 1-30 characters"))]
    pub nickname: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Surname must be 1-100 characters"))]
    pub surname: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 1000, message = "Biography must be at most 1000 characters"))]
    #[serde(default)]
    pub biography: String,

    /// Base64 picture; none resets to the default picture
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// Password change request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub user_id: Snowflake,

    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub new_password: String,
}

// ============================================================================
// Post Requests
// ============================================================================

/// Publish post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PublishPostRequest {
    pub author_id: Snowflake,

    /// Base64 picture
    #[validate(length(min = 1, message = "A picture is required"))]
    pub picture: String,

    #[validate(length(max = 2000, message = "Text must be at most 2000 characters"))]
    #[serde(default)]
    pub text: String,
}

/// Comment on a post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PublishCommentRequest {
    pub post_id: Snowflake,
    pub author_id: Snowflake,

    #[validate(length(min = 1, max = 1000, message = "Comment must be 1-1000 characters"))]
    pub text: String,
}
