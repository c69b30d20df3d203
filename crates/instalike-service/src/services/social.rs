//! Social service
//!
//! Handles the follow graph and profile lookups.

use instalike_core::events::{UserFollowedEvent, UserUnfollowedEvent};
use instalike_core::{DomainEvent, Entity, Nickname, Snowflake, User};
use tracing::{info, instrument};

use crate::dto::{NicknameDirectory, PostResponse, ProfileResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Social service
pub struct SocialService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SocialService<'a> {
    /// Create a new SocialService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Make `follower_id` follow the user called `nickname`
    #[instrument(skip(self))]
    pub async fn follow(&self, follower_id: Snowflake, nickname: &str) -> ServiceResult<()> {
        let mut follower = self.load_user(follower_id).await?;
        let mut followed = self.load_by_nickname(nickname).await?;

        follower.follow(&mut followed)?;

        self.ctx.user_repo().save(&mut follower).await?;
        self.ctx.user_repo().save(&mut followed).await?;

        info!(
            follower_id = %follower_id,
            followed_id = %followed.id(),
            "User followed"
        );

        self.ctx
            .publish(DomainEvent::UserFollowed(UserFollowedEvent::new(
                follower_id,
                follower.nickname().clone(),
                followed.id(),
            )))
            .await;

        Ok(())
    }

    /// Make `follower_id` stop following the user called `nickname`
    #[instrument(skip(self))]
    pub async fn unfollow(&self, follower_id: Snowflake, nickname: &str) -> ServiceResult<()> {
        let mut follower = self.load_user(follower_id).await?;
        let mut followed = self.load_by_nickname(nickname).await?;

        follower.unfollow(&mut followed)?;

        self.ctx.user_repo().save(&mut follower).await?;
        self.ctx.user_repo().save(&mut followed).await?;

        info!(
            follower_id = %follower_id,
            followed_id = %followed.id(),
            "User unfollowed"
        );

        self.ctx
            .publish(DomainEvent::UserUnfollowed(UserUnfollowedEvent::new(
                follower_id,
                follower.nickname().clone(),
                followed.id(),
            )))
            .await;

        Ok(())
    }

    /// Public profile of `nickname`, with the viewer's relation when known
    #[instrument(skip(self))]
    pub async fn profile(
        &self,
        nickname: &str,
        viewer_id: Option<Snowflake>,
    ) -> ServiceResult<ProfileResponse> {
        let owner = self.load_by_nickname(nickname).await?;
        let response = ProfileResponse::from(&owner);

        match viewer_id {
            Some(viewer_id) => {
                let viewer = self.load_user(viewer_id).await?;
                Ok(response.seen_by(&owner, &viewer))
            }
            None => Ok(response),
        }
    }

    /// Posts of the users `user_id` follows, newest first
    #[instrument(skip(self))]
    pub async fn timeline(&self, user_id: Snowflake) -> ServiceResult<Vec<PostResponse>> {
        let user = self.load_user(user_id).await?;

        let mut posts = Vec::new();
        for followed in user.followed() {
            posts.extend(self.ctx.post_repo().find_by_author(followed.id()).await?);
        }
        posts.sort_by_key(|post| std::cmp::Reverse(post.id()));

        let directory = self
            .ctx
            .nicknames(posts.iter().flat_map(NicknameDirectory::people_of))
            .await?;

        Ok(posts
            .iter()
            .map(|post| PostResponse::new(post, &directory).seen_by(post, &user))
            .collect())
    }

    async fn load_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    async fn load_by_nickname(&self, nickname: &str) -> ServiceResult<User> {
        let not_found = || ServiceError::not_found("User", nickname);

        let Ok(parsed) = Nickname::create(nickname) else {
            return Err(not_found());
        };
        self.ctx
            .user_repo()
            .find_by_nickname(&parsed)
            .await?
            .ok_or_else(not_found)
    }
}
