//! Like entity - one user's appreciation of one post

use chrono::{DateTime, Utc};

use crate::entities::{entity_equality, Entity, EntityRef, Identity, Post, User};
use crate::value_objects::Snowflake;

/// A like recorded on a [`Post`]
///
/// Only [`Post::put_like_by`] creates likes, so every like belongs to exactly
/// one post and one user.
#[derive(Debug, Clone)]
pub struct Like {
    identity: Identity<Snowflake>,
    post: EntityRef<Snowflake>,
    user: EntityRef<Snowflake>,
    liked_at: DateTime<Utc>,
}

impl Like {
    pub(crate) fn new(post: &Post, user: &User) -> Self {
        Self {
            identity: Identity::transient(),
            post: post.entity_ref(),
            user: user.entity_ref(),
            liked_at: Utc::now(),
        }
    }

    pub fn post(&self) -> EntityRef<Snowflake> {
        self.post
    }

    pub fn user(&self) -> EntityRef<Snowflake> {
        self.user
    }

    pub fn liked_at(&self) -> DateTime<Utc> {
        self.liked_at
    }

    pub fn is_by(&self, user: &User) -> bool {
        self.user.refers_to(user)
    }

    pub(crate) fn repoint_post(&mut self, post: EntityRef<Snowflake>) {
        self.post = post;
    }
}

impl Entity for Like {
    type Id = Snowflake;

    fn identity(&self) -> &Identity<Snowflake> {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity<Snowflake> {
        &mut self.identity
    }
}

entity_equality!(Like);
