//! Post aggregate - a published picture with its likes and comments

use chrono::{DateTime, Utc};

use crate::entities::{entity_equality, Comment, Entity, EntityRef, Identity, Like, User};
use crate::error::{DomainError, DomainResult};
use crate::value_objects::{Picture, PostText, Snowflake};

#[derive(Debug, Clone)]
pub struct Post {
    identity: Identity<Snowflake>,
    author: EntityRef<Snowflake>,
    picture: Picture,
    text: PostText,
    posted_at: DateTime<Utc>,
    likes: Vec<Like>,
    comments: Vec<Comment>,
}

impl Post {
    /// Create a new post; the author is fixed for the lifetime of the post
    pub fn new(author: &User, picture: Picture, text: PostText) -> Self {
        Self {
            identity: Identity::transient(),
            author: author.entity_ref(),
            picture,
            text,
            posted_at: Utc::now(),
            likes: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn author(&self) -> EntityRef<Snowflake> {
        self.author
    }

    pub fn is_authored_by(&self, user: &User) -> bool {
        self.author.refers_to(user)
    }

    pub fn picture(&self) -> &Picture {
        &self.picture
    }

    pub fn text(&self) -> &PostText {
        &self.text
    }

    pub fn posted_at(&self) -> DateTime<Utc> {
        self.posted_at
    }

    pub fn likes(&self) -> &[Like] {
        &self.likes
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    /// Comments in the order they were added
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Check whether `user` currently likes this post
    pub fn likes_to(&self, user: &User) -> bool {
        self.likes.iter().any(|like| like.is_by(user))
    }

    /// Record a like by `user`
    ///
    /// Authors cannot like their own posts and each user likes a post at
    /// most once.
    pub fn put_like_by(&mut self, user: &User) -> DomainResult<()> {
        if self.is_authored_by(user) {
            return Err(DomainError::CannotLikeOwnPost {
                nickname: user.nickname().to_string(),
            });
        }
        if self.likes_to(user) {
            return Err(DomainError::AlreadyLiked {
                nickname: user.nickname().to_string(),
            });
        }

        let like = Like::new(self, user);
        self.likes.push(like);
        Ok(())
    }

    /// Remove the like previously put by `user`
    pub fn remove_like_by(&mut self, user: &User) -> DomainResult<()> {
        let Some(index) = self.likes.iter().position(|like| like.is_by(user)) else {
            return Err(DomainError::LikeNotFound {
                nickname: user.nickname().to_string(),
            });
        };

        self.likes.remove(index);
        Ok(())
    }

    /// Append a comment; duplicates are allowed
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Give storage ids to this post and every transient like and comment
    ///
    /// Meant for persistence adapters. Likes created before the post had an
    /// id are repointed at the persisted post.
    pub fn assign_missing_ids(&mut self, mut next_id: impl FnMut() -> Snowflake) {
        if self.is_transient() {
            self.assign_id(next_id());
        }
        let me = self.entity_ref();
        for like in &mut self.likes {
            if like.is_transient() {
                like.assign_id(next_id());
            }
            like.repoint_post(me);
        }
        for comment in &mut self.comments {
            if comment.is_transient() {
                comment.assign_id(next_id());
            }
        }
    }
}

impl Entity for Post {
    type Id = Snowflake;

    fn identity(&self) -> &Identity<Snowflake> {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity<Snowflake> {
        &mut self.identity
    }
}

entity_equality!(Post);
