//! Post service
//!
//! Handles publishing posts, likes and comments.

use instalike_core::events::{
    CommentPublishedEvent, PostLikedEvent, PostPublishedEvent, PostUnlikedEvent,
};
use instalike_core::{Comment, DomainEvent, Entity, Nickname, Post, PostText, Snowflake, User};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{NicknameDirectory, PostResponse, PublishCommentRequest, PublishPostRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Publish a new post and return its id
    #[instrument(skip(self, request), fields(author_id = %request.author_id))]
    pub async fn publish(&self, request: PublishPostRequest) -> ServiceResult<Snowflake> {
        request.validate()?;

        let author = self.load_user(request.author_id).await?;
        let picture = self.ctx.decode_picture(&request.picture)?;
        let text = PostText::create(&request.text)?;

        let mut post = Post::new(&author, picture, text);
        let post_id = self.ctx.post_repo().save(&mut post).await?;

        info!(post_id = %post_id, author_id = %author.id(), "Post published");

        self.ctx
            .publish(DomainEvent::PostPublished(PostPublishedEvent::new(
                post_id,
                author.id(),
                author.nickname().clone(),
            )))
            .await;

        Ok(post_id)
    }

    /// Like a post
    #[instrument(skip(self))]
    pub async fn like(&self, post_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let mut post = self.load_post(post_id).await?;
        let user = self.load_user(user_id).await?;

        user.put_like_to(&mut post)?;
        self.ctx.post_repo().save(&mut post).await?;

        info!(post_id = %post_id, user_id = %user_id, likes = post.like_count(), "Post liked");

        self.ctx
            .publish(DomainEvent::PostLiked(PostLikedEvent::new(
                post_id,
                post.author().id(),
                user_id,
                user.nickname().clone(),
            )))
            .await;

        Ok(())
    }

    /// Remove a like
    #[instrument(skip(self))]
    pub async fn unlike(&self, post_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let mut post = self.load_post(post_id).await?;
        let user = self.load_user(user_id).await?;

        user.remove_like_from(&mut post)?;
        self.ctx.post_repo().save(&mut post).await?;

        info!(post_id = %post_id, user_id = %user_id, likes = post.like_count(), "Post unliked");

        self.ctx
            .publish(DomainEvent::PostUnliked(PostUnlikedEvent::new(
                post_id,
                post.author().id(),
                user_id,
                user.nickname().clone(),
            )))
            .await;

        Ok(())
    }

    /// Comment on a post and return the comment id
    #[instrument(skip(self, request), fields(post_id = %request.post_id, author_id = %request.author_id))]
    pub async fn comment(&self, request: PublishCommentRequest) -> ServiceResult<Snowflake> {
        request.validate()?;

        let mut post = self.load_post(request.post_id).await?;
        let author = self.load_user(request.author_id).await?;

        post.add_comment(Comment::create(&author, &request.text)?);
        self.ctx.post_repo().save(&mut post).await?;

        let comment_id = post
            .comments()
            .last()
            .map(Entity::id)
            .ok_or_else(|| ServiceError::internal("comment missing after save"))?;

        info!(comment_id = %comment_id, post_id = %post.id(), "Comment published");

        self.ctx
            .publish(DomainEvent::CommentPublished(CommentPublishedEvent::new(
                comment_id,
                post.id(),
                post.author().id(),
                author.id(),
                author.nickname().clone(),
            )))
            .await;

        Ok(comment_id)
    }

    /// Get a post, with the viewer's like state when known
    #[instrument(skip(self))]
    pub async fn find(
        &self,
        post_id: Snowflake,
        viewer_id: Option<Snowflake>,
    ) -> ServiceResult<PostResponse> {
        let post = self.load_post(post_id).await?;
        let directory = self.ctx.nicknames(NicknameDirectory::people_of(&post)).await?;
        let response = PostResponse::new(&post, &directory);

        match viewer_id {
            Some(viewer_id) => {
                let viewer = self.load_user(viewer_id).await?;
                Ok(response.seen_by(&post, &viewer))
            }
            None => Ok(response),
        }
    }

    /// Posts written by `nickname`, newest first
    #[instrument(skip(self))]
    pub async fn posts_by(&self, nickname: &str) -> ServiceResult<Vec<PostResponse>> {
        let not_found = || ServiceError::not_found("User", nickname);
        let Ok(parsed) = Nickname::create(nickname) else {
            return Err(not_found());
        };
        let author = self
            .ctx
            .user_repo()
            .find_by_nickname(&parsed)
            .await?
            .ok_or_else(not_found)?;

        let posts = self.ctx.post_repo().find_by_author(author.id()).await?;
        let directory = self
            .ctx
            .nicknames(posts.iter().flat_map(NicknameDirectory::people_of))
            .await?;
        Ok(posts
            .iter()
            .map(|post| PostResponse::new(post, &directory))
            .collect())
    }

    async fn load_post(&self, post_id: Snowflake) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))
    }

    async fn load_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}
