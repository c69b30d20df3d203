//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Responses that name other users resolve nicknames through a
//! [`NicknameDirectory`] so a renamed user shows up under the new name.

use std::collections::HashMap;

use instalike_core::{Comment, Entity, EntityRef, Notification, Post, Snowflake, User};

use super::responses::{
    CommentResponse, CurrentUserResponse, NotificationResponse, PostResponse, ProfileResponse,
};

// ============================================================================
// Nickname Directory
// ============================================================================

/// Current nicknames of the users a response mentions
#[derive(Debug, Clone, Default)]
pub struct NicknameDirectory {
    nicknames: HashMap<Snowflake, String>,
}

impl NicknameDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, user: &User) {
        self.nicknames.insert(user.id(), user.nickname().to_string());
    }

    pub fn contains(&self, id: Snowflake) -> bool {
        self.nicknames.contains_key(&id)
    }

    /// Nickname of the referenced user, empty when the user was not loaded
    pub fn nickname_of(&self, user: EntityRef<Snowflake>) -> &str {
        self.nicknames
            .get(&user.id())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Ids of every user named in a [`PostResponse`] for `post`
    pub fn people_of(post: &Post) -> impl Iterator<Item = Snowflake> + '_ {
        std::iter::once(post.author().id())
            .chain(post.comments().iter().map(|comment| comment.author().id()))
    }
}

impl<'a> FromIterator<&'a User> for NicknameDirectory {
    fn from_iter<T: IntoIterator<Item = &'a User>>(users: T) -> Self {
        let mut directory = Self::new();
        for user in users {
            directory.insert(user);
        }
        directory
    }
}

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            nickname: user.nickname().to_string(),
            full_name: user.full_name().to_string(),
            biography: user.biography().to_string(),
            profile_picture: user.profile_picture().to_data_uri(),
            followers_count: user.followers_count(),
            following_count: user.followed_count(),
            registered_at: user.registered_at(),
            followed_by_viewer: None,
        }
    }
}

impl ProfileResponse {
    /// Fill in the relation between `viewer` and the profile owner
    pub fn seen_by(mut self, owner: &User, viewer: &User) -> Self {
        self.followed_by_viewer = Some(owner.is_followed_by(viewer));
        self
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            nickname: user.nickname().to_string(),
            name: user.full_name().name().to_string(),
            surname: user.full_name().surname().to_string(),
            email: user.email().to_string(),
            biography: user.biography().to_string(),
            profile_picture: user.profile_picture().to_data_uri(),
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

impl CommentResponse {
    pub fn new(comment: &Comment, directory: &NicknameDirectory) -> Self {
        Self {
            id: comment.id().to_string(),
            author_nickname: directory.nickname_of(comment.author()).to_string(),
            text: comment.text().to_string(),
            published_at: comment.published_at(),
        }
    }
}

impl PostResponse {
    pub fn new(post: &Post, directory: &NicknameDirectory) -> Self {
        Self {
            id: post.id().to_string(),
            author_id: post.author().id().to_string(),
            author_nickname: directory.nickname_of(post.author()).to_string(),
            picture: post.picture().to_data_uri(),
            text: post.text().to_string(),
            posted_at: post.posted_at(),
            like_count: post.like_count(),
            comments: post
                .comments()
                .iter()
                .map(|comment| CommentResponse::new(comment, directory))
                .collect(),
            liked_by_viewer: None,
        }
    }

    pub fn seen_by(mut self, post: &Post, viewer: &User) -> Self {
        self.liked_by_viewer = Some(post.likes_to(viewer));
        self
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl NotificationResponse {
    pub fn new(notification: &Notification, directory: &NicknameDirectory) -> Self {
        Self {
            id: notification.id().to_string(),
            sender_nickname: directory.nickname_of(notification.sender()).to_string(),
            message: notification.message().to_string(),
            created_at: notification.created_at(),
            read: notification.is_read(),
        }
    }
}
