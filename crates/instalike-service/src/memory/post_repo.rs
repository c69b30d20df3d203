//! In-memory post repository

use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use instalike_core::traits::{PostRepository, RepoResult, RepositoryError};
use instalike_core::{Entity, Post, Snowflake, SnowflakeGenerator};

/// Posts keyed by id, stored with their likes and comments
pub struct InMemoryPostRepository {
    posts: DashMap<Snowflake, Post>,
    generator: Arc<SnowflakeGenerator>,
}

impl InMemoryPostRepository {
    pub fn new(generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            posts: DashMap::new(),
            generator,
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        Ok(self.posts.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|entry| entry.value().author().id() == author_id)
            .map(|entry| entry.value().clone())
            .collect();

        // Snowflakes are time ordered
        posts.sort_by_key(|post| Reverse(post.id()));
        Ok(posts)
    }

    async fn save(&self, post: &mut Post) -> RepoResult<Snowflake> {
        if !post.is_transient() && !self.posts.contains_key(&post.id()) {
            return Err(RepositoryError::Missing {
                entity: "Post",
                id: post.id(),
            });
        }

        post.assign_missing_ids(|| self.generator.generate());

        let id = post.id();
        self.posts.insert(id, post.clone());
        tracing::debug!(
            post_id = %id,
            likes = post.like_count(),
            comments = post.comment_count(),
            "Post saved"
        );
        Ok(id)
    }
}
