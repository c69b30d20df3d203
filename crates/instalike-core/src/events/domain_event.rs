//! Domain events - events emitted when domain state changes
//!
//! These events are used for:
//! - Producing notifications for the affected users
//! - Audit logging of account activity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Nickname, Snowflake};

/// All possible domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    // =========================================================================
    // Account Events
    // =========================================================================
    UserRegistered(UserRegisteredEvent),
    UserProfileUpdated(UserProfileUpdatedEvent),
    UserLoggedIn(UserLoggedInEvent),
    UserLoggedOut(UserLoggedOutEvent),

    // =========================================================================
    // Follow Events
    // =========================================================================
    UserFollowed(UserFollowedEvent),
    UserUnfollowed(UserUnfollowedEvent),

    // =========================================================================
    // Post Events
    // =========================================================================
    PostPublished(PostPublishedEvent),
    PostLiked(PostLikedEvent),
    PostUnliked(PostUnlikedEvent),
    CommentPublished(CommentPublishedEvent),
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::UserRegistered(_) => "USER_REGISTERED",
            Self::UserProfileUpdated(_) => "USER_PROFILE_UPDATED",
            Self::UserLoggedIn(_) => "USER_LOGGED_IN",
            Self::UserLoggedOut(_) => "USER_LOGGED_OUT",
            Self::UserFollowed(_) => "USER_FOLLOWED",
            Self::UserUnfollowed(_) => "USER_UNFOLLOWED",
            Self::PostPublished(_) => "POST_PUBLISHED",
            Self::PostLiked(_) => "POST_LIKED",
            Self::PostUnliked(_) => "POST_UNLIKED",
            Self::CommentPublished(_) => "COMMENT_PUBLISHED",
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::UserRegistered(e) => e.timestamp,
            Self::UserProfileUpdated(e) => e.timestamp,
            Self::UserLoggedIn(e) => e.timestamp,
            Self::UserLoggedOut(e) => e.timestamp,
            Self::UserFollowed(e) => e.timestamp,
            Self::UserUnfollowed(e) => e.timestamp,
            Self::PostPublished(e) => e.timestamp,
            Self::PostLiked(e) => e.timestamp,
            Self::PostUnliked(e) => e.timestamp,
            Self::CommentPublished(e) => e.timestamp,
        }
    }

    /// Id of the user whose action produced the event
    pub fn actor_id(&self) -> Snowflake {
        match self {
            Self::UserRegistered(e) => e.user_id,
            Self::UserProfileUpdated(e) => e.user_id,
            Self::UserLoggedIn(e) => e.user_id,
            Self::UserLoggedOut(e) => e.user_id,
            Self::UserFollowed(e) => e.follower_id,
            Self::UserUnfollowed(e) => e.follower_id,
            Self::PostPublished(e) => e.author_id,
            Self::PostLiked(e) => e.user_id,
            Self::PostUnliked(e) => e.user_id,
            Self::CommentPublished(e) => e.author_id,
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegisteredEvent {
    pub user_id: Snowflake,
    pub nickname: Nickname,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileUpdatedEvent {
    pub user_id: Snowflake,
    pub nickname: Nickname,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLoggedInEvent {
    pub user_id: Snowflake,
    pub nickname: Nickname,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLoggedOutEvent {
    pub user_id: Snowflake,
    pub nickname: Nickname,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFollowedEvent {
    pub follower_id: Snowflake,
    pub follower_nickname: Nickname,
    pub followed_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUnfollowedEvent {
    pub follower_id: Snowflake,
    pub follower_nickname: Nickname,
    pub followed_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPublishedEvent {
    pub post_id: Snowflake,
    pub author_id: Snowflake,
    pub author_nickname: Nickname,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostLikedEvent {
    pub post_id: Snowflake,
    pub post_author_id: Snowflake,
    pub user_id: Snowflake,
    pub user_nickname: Nickname,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostUnlikedEvent {
    pub post_id: Snowflake,
    pub post_author_id: Snowflake,
    pub user_id: Snowflake,
    pub user_nickname: Nickname,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentPublishedEvent {
    pub comment_id: Snowflake,
    pub post_id: Snowflake,
    pub post_author_id: Snowflake,
    pub author_id: Snowflake,
    pub author_nickname: Nickname,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Event Creation Helpers
// ============================================================================

macro_rules! user_event_ctor {
    ($($event:ident),+ $(,)?) => {
        $(
            impl $event {
                pub fn new(user_id: Snowflake, nickname: Nickname) -> Self {
                    Self {
                        user_id,
                        nickname,
                        timestamp: Utc::now(),
                    }
                }
            }
        )+
    };
}

user_event_ctor!(
    UserRegisteredEvent,
    UserProfileUpdatedEvent,
    UserLoggedInEvent,
    UserLoggedOutEvent,
);

impl UserFollowedEvent {
    pub fn new(follower_id: Snowflake, follower_nickname: Nickname, followed_id: Snowflake) -> Self {
        Self {
            follower_id,
            follower_nickname,
            followed_id,
            timestamp: Utc::now(),
        }
    }
}

impl UserUnfollowedEvent {
    pub fn new(follower_id: Snowflake, follower_nickname: Nickname, followed_id: Snowflake) -> Self {
        Self {
            follower_id,
            follower_nickname,
            followed_id,
            timestamp: Utc::now(),
        }
    }
}

impl PostPublishedEvent {
    pub fn new(post_id: Snowflake, author_id: Snowflake, author_nickname: Nickname) -> Self {
        Self {
            post_id,
            author_id,
            author_nickname,
            timestamp: Utc::now(),
        }
    }
}

impl PostLikedEvent {
    pub fn new(
        post_id: Snowflake,
        post_author_id: Snowflake,
        user_id: Snowflake,
        user_nickname: Nickname,
    ) -> Self {
        Self {
            post_id,
            post_author_id,
            user_id,
            user_nickname,
            timestamp: Utc::now(),
        }
    }
}

impl PostUnlikedEvent {
    pub fn new(
        post_id: Snowflake,
        post_author_id: Snowflake,
        user_id: Snowflake,
        user_nickname: Nickname,
    ) -> Self {
        Self {
            post_id,
            post_author_id,
            user_id,
            user_nickname,
            timestamp: Utc::now(),
        }
    }
}

impl CommentPublishedEvent {
    pub fn new(
        comment_id: Snowflake,
        post_id: Snowflake,
        post_author_id: Snowflake,
        author_id: Snowflake,
        author_nickname: Nickname,
    ) -> Self {
        Self {
            comment_id,
            post_id,
            post_author_id,
            author_id,
            author_nickname,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nickname(value: &str) -> Nickname {
        Nickname::create(value).unwrap()
    }

    #[test]
    fn test_event_serialization() {
        let event = DomainEvent::PostLiked(PostLikedEvent::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            nickname("fan"),
        ));

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("POST_LIKED"));
        assert!(json.contains("\"user_nickname\":\"fan\""));

        let parsed: DomainEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.event_type(), "POST_LIKED");
        assert_eq!(parsed.actor_id(), Snowflake::new(3));
    }

    #[test]
    fn test_event_type() {
        let event =
            DomainEvent::UserRegistered(UserRegisteredEvent::new(Snowflake::new(1), nickname("a")));
        assert_eq!(event.event_type(), "USER_REGISTERED");
    }

    #[test]
    fn test_invalid_nickname_rejected_on_deserialize() {
        let json = r#"{"type":"USER_LOGGED_IN","user_id":"1","nickname":"has space","timestamp":"2025-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<DomainEvent>(json).is_err());
    }

    #[test]
    fn test_follow_actor_is_follower() {
        let event = DomainEvent::UserFollowed(UserFollowedEvent::new(
            Snowflake::new(10),
            nickname("follower"),
            Snowflake::new(20),
        ));
        assert_eq!(event.actor_id(), Snowflake::new(10));
    }
}
