//! User aggregate - profile, credentials and the follow graph

use chrono::{DateTime, Utc};

use crate::entities::{entity_equality, Entity, EntityRef, Identity, Post};
use crate::error::{DomainError, DomainResult};
use crate::value_objects::{Email, FullName, Nickname, Password, Picture, Snowflake};

/// A registered member of the site
///
/// The follow relation is stored on both sides: `followed` lists who this
/// user follows, `followers` mirrors the edges pointing at this user. Both
/// lists are duplicate-free and keep insertion order.
#[derive(Debug, Clone)]
pub struct User {
    identity: Identity<Snowflake>,
    nickname: Nickname,
    full_name: FullName,
    email: Email,
    password: Password,
    biography: String,
    profile_picture: Picture,
    followed: Vec<EntityRef<Snowflake>>,
    followers: Vec<EntityRef<Snowflake>>,
    registered_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, not yet persisted user with the default profile picture
    pub fn new(
        nickname: Nickname,
        full_name: FullName,
        password: Password,
        email: Email,
        biography: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            identity: Identity::transient(),
            nickname,
            full_name,
            email,
            password,
            biography: biography.into(),
            profile_picture: Picture::Default,
            followed: Vec::new(),
            followers: Vec::new(),
            registered_at: now,
            updated_at: now,
        }
    }

    // === Read surface ===

    #[inline]
    pub fn nickname(&self) -> &Nickname {
        &self.nickname
    }

    #[inline]
    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    #[inline]
    pub fn email(&self) -> &Email {
        &self.email
    }

    #[inline]
    pub fn password(&self) -> &Password {
        &self.password
    }

    #[inline]
    pub fn biography(&self) -> &str {
        &self.biography
    }

    #[inline]
    pub fn profile_picture(&self) -> &Picture {
        &self.profile_picture
    }

    /// Users this user follows
    pub fn followed(&self) -> &[EntityRef<Snowflake>] {
        &self.followed
    }

    /// Users following this user
    pub fn followers(&self) -> &[EntityRef<Snowflake>] {
        &self.followers
    }

    pub fn followed_count(&self) -> usize {
        self.followed.len()
    }

    pub fn followers_count(&self) -> usize {
        self.followers.len()
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // === Profile ===

    pub fn change_nickname(&mut self, nickname: Nickname) {
        self.nickname = nickname;
        self.touch();
    }

    pub fn change_full_name(&mut self, full_name: FullName) {
        self.full_name = full_name;
        self.touch();
    }

    pub fn change_email_address(&mut self, email: Email) {
        self.email = email;
        self.touch();
    }

    pub fn update_biography(&mut self, biography: impl Into<String>) {
        self.biography = biography.into();
        self.touch();
    }

    /// Replace the stored credential; the previous plaintext stops verifying
    pub fn change_password(&mut self, password: Password) {
        self.password = password;
        self.touch();
    }

    pub fn set_profile_picture(&mut self, picture: Picture) {
        self.profile_picture = picture;
        self.touch();
    }

    /// Go back to the site-wide placeholder picture
    pub fn set_default_profile_picture(&mut self) {
        self.set_profile_picture(Picture::Default);
    }

    // === Follow graph ===

    /// Start following `other`
    ///
    /// Records the edge on both users. Fails without touching either side when
    /// `other` is this same user or is already followed.
    ///
    /// There is no way to pass "no user": a missing target must be handled by
    /// the caller before reaching the aggregate.
    ///
    /// ```compile_fail
    /// # use instalike_core::User;
    /// # fn check(user: &mut User) {
    /// user.follow(None);
    /// # }
    /// ```
    pub fn follow(&mut self, other: &mut User) -> DomainResult<()> {
        if self.entity_ref().designates_same(&other.entity_ref()) {
            return Err(DomainError::CannotFollowSelf {
                nickname: self.nickname.to_string(),
            });
        }
        if self.is_following(other) {
            return Err(DomainError::AlreadyFollowing {
                follower: self.nickname.to_string(),
                followed: other.nickname.to_string(),
            });
        }

        self.followed.push(other.entity_ref());
        other.followers.push(self.entity_ref());
        Ok(())
    }

    /// Stop following `other`; fails if no such edge exists
    pub fn unfollow(&mut self, other: &mut User) -> DomainResult<()> {
        let Some(index) = self.position_in_followed(other) else {
            return Err(DomainError::NotFollowing {
                follower: self.nickname.to_string(),
                followed: other.nickname.to_string(),
            });
        };

        self.followed.remove(index);
        let me = self.entity_ref();
        other.followers.retain(|follower| !follower.designates_same(&me));
        Ok(())
    }

    pub fn is_following(&self, other: &User) -> bool {
        self.position_in_followed(other).is_some()
    }

    pub fn is_followed_by(&self, other: &User) -> bool {
        self.followers.iter().any(|follower| follower.refers_to(other))
    }

    fn position_in_followed(&self, other: &User) -> Option<usize> {
        self.followed.iter().position(|followed| followed.refers_to(other))
    }

    // === Likes ===

    /// Like `post`; the post enforces the like rules
    pub fn put_like_to(&self, post: &mut Post) -> DomainResult<()> {
        post.put_like_by(self)
    }

    pub fn remove_like_from(&self, post: &mut Post) -> DomainResult<()> {
        post.remove_like_by(self)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for User {
    type Id = Snowflake;

    fn identity(&self) -> &Identity<Snowflake> {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity<Snowflake> {
        &mut self.identity
    }
}

entity_equality!(User);
