//! Comment entity

use chrono::{DateTime, Utc};

use crate::entities::{entity_equality, Entity, EntityRef, Identity, User};
use crate::error::{DomainError, DomainResult};
use crate::value_objects::Snowflake;

/// A comment written by a user under a post
#[derive(Debug, Clone)]
pub struct Comment {
    identity: Identity<Snowflake>,
    author: EntityRef<Snowflake>,
    text: String,
    published_at: DateTime<Utc>,
}

impl Comment {
    pub const MAX_LEN: usize = 1000;

    /// Create a comment by `author`; the text must not be blank
    pub fn create(author: &User, text: &str) -> DomainResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::InvalidComment(
                "Comment cannot be empty".to_string(),
            ));
        }
        if text.chars().count() > Self::MAX_LEN {
            return Err(DomainError::ContentTooLong { max: Self::MAX_LEN });
        }

        Ok(Self {
            identity: Identity::transient(),
            author: author.entity_ref(),
            text: text.to_string(),
            published_at: Utc::now(),
        })
    }

    pub fn author(&self) -> EntityRef<Snowflake> {
        self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }
}

impl Entity for Comment {
    type Id = Snowflake;

    fn identity(&self) -> &Identity<Snowflake> {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity<Snowflake> {
        &mut self.identity
    }
}

entity_equality!(Comment);
