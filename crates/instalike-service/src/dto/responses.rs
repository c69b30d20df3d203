//! Response DTOs
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Profile as shown to any visitor
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub nickname: String,
    pub full_name: String,
    pub biography: String,
    /// `data:` URI of the profile picture
    pub profile_picture: String,
    pub followers_count: usize,
    pub following_count: usize,
    pub registered_at: DateTime<Utc>,
    /// Whether the viewing user follows this profile; absent for anonymous viewers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followed_by_viewer: Option<bool>,
}

/// The authenticated user's own account
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub nickname: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub biography: String,
    pub profile_picture: String,
}

// ============================================================================
// Post Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub author_nickname: String,
    pub text: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub author_nickname: String,
    pub picture: String,
    pub text: String,
    pub posted_at: DateTime<Utc>,
    pub like_count: usize,
    pub comments: Vec<CommentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked_by_viewer: Option<bool>,
}

// ============================================================================
// Notification Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub sender_nickname: String,
    /// HTML fragment
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}
