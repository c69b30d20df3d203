//! Account service
//!
//! Handles registration, authentication, profile edits, password changes and logout.

use instalike_core::events::{
    UserLoggedInEvent, UserLoggedOutEvent, UserProfileUpdatedEvent, UserRegisteredEvent,
};
use instalike_core::{DomainEvent, Email, Entity, FullName, Nickname, Password, Snowflake, User};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{ChangePasswordRequest, CurrentUserResponse, EditUserDetailsRequest, RegisterUserRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Account service
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    /// Create a new AccountService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and return its id
    #[instrument(skip(self, request), fields(nickname = %request.nickname))]
    pub async fn register(&self, request: RegisterUserRequest) -> ServiceResult<Snowflake> {
        request.validate()?;

        let (nickname, full_name, email) =
            parse_identity(&request.nickname, &request.name, &request.surname, &request.email)?;

        if self.ctx.user_repo().nickname_exists(&nickname).await? {
            return Err(ServiceError::conflict(format!(
                "Nickname [{nickname}] is already taken."
            )));
        }
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(ServiceError::conflict(format!(
                "Email address [{email}] is already registered."
            )));
        }

        self.ctx.password_policy().check(&request.password)?;
        let password = Password::create(&request.password)?;

        let picture = request
            .profile_picture
            .as_deref()
            .map(|encoded| self.ctx.decode_picture(encoded))
            .transpose()?;

        let mut user = User::new(
            nickname,
            full_name,
            password,
            email,
            request.biography.unwrap_or_default(),
        );
        if let Some(picture) = picture {
            user.set_profile_picture(picture);
        }

        let user_id = self.ctx.user_repo().save(&mut user).await?;

        info!(user_id = %user_id, "User registered successfully");

        self.ctx
            .publish(DomainEvent::UserRegistered(UserRegisteredEvent::new(
                user_id,
                user.nickname().clone(),
            )))
            .await;

        Ok(user_id)
    }

    /// Check credentials and return the matching user
    ///
    /// Unknown nicknames and wrong passwords fail the same way.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, nickname: &str, password: &str) -> ServiceResult<User> {
        let Ok(nickname) = Nickname::create(nickname) else {
            warn!("Login failed: malformed nickname");
            return Err(ServiceError::invalid_credentials());
        };

        let user = self
            .ctx
            .user_repo()
            .find_by_nickname(&nickname)
            .await?
            .ok_or_else(|| {
                warn!(nickname = %nickname, "Login failed: user not found");
                ServiceError::invalid_credentials()
            })?;

        if !user.password().hash_matches(password) {
            warn!(user_id = %user.id(), "Login failed: invalid password");
            return Err(ServiceError::invalid_credentials());
        }

        info!(user_id = %user.id(), "User logged in successfully");

        self.ctx
            .publish(DomainEvent::UserLoggedIn(UserLoggedInEvent::new(
                user.id(),
                user.nickname().clone(),
            )))
            .await;

        Ok(user)
    }

    /// Update nickname, full name, email, biography and profile picture
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn edit_details(
        &self,
        request: EditUserDetailsRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        request.validate()?;

        let mut user = self.load_user(request.user_id).await?;

        let (nickname, full_name, email) =
            parse_identity(&request.nickname, &request.name, &request.surname, &request.email)?;

        if user.nickname() != &nickname && self.ctx.user_repo().nickname_exists(&nickname).await? {
            return Err(ServiceError::conflict(format!(
                "Nickname [{nickname}] is already taken."
            )));
        }
        if user.email() != &email && self.ctx.user_repo().email_exists(&email).await? {
            return Err(ServiceError::conflict(format!(
                "Email address [{email}] is already registered."
            )));
        }

        let picture = request
            .profile_picture
            .as_deref()
            .map(|encoded| self.ctx.decode_picture(encoded))
            .transpose()?;

        user.change_nickname(nickname);
        user.change_full_name(full_name);
        user.change_email_address(email);
        user.update_biography(request.biography);
        match picture {
            Some(picture) => user.set_profile_picture(picture),
            None => user.set_default_profile_picture(),
        }

        self.ctx.user_repo().save(&mut user).await?;

        info!(user_id = %user.id(), "User profile updated");

        self.ctx
            .publish(DomainEvent::UserProfileUpdated(
                UserProfileUpdatedEvent::new(user.id(), user.nickname().clone()),
            ))
            .await;

        Ok(CurrentUserResponse::from(&user))
    }

    /// Replace the password after verifying the current one
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn change_password(&self, request: ChangePasswordRequest) -> ServiceResult<()> {
        request.validate()?;

        let mut user = self.load_user(request.user_id).await?;

        if !user.password().hash_matches(&request.current_password) {
            warn!(user_id = %user.id(), "Password change refused: wrong current password");
            return Err(ServiceError::validation("Current password is not valid."));
        }

        self.ctx.password_policy().check(&request.new_password)?;
        user.change_password(Password::create(&request.new_password)?);

        self.ctx.user_repo().save(&mut user).await?;

        info!(user_id = %user.id(), "Password changed");
        Ok(())
    }

    /// End the user's session
    #[instrument(skip(self))]
    pub async fn logout(&self, user_id: Snowflake) -> ServiceResult<()> {
        let user = self.load_user(user_id).await?;

        info!(user_id = %user_id, "User logged out");

        self.ctx
            .publish(DomainEvent::UserLoggedOut(UserLoggedOutEvent::new(
                user_id,
                user.nickname().clone(),
            )))
            .await;

        Ok(())
    }

    /// Get the authenticated user's own account
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self.load_user(user_id).await?;
        Ok(CurrentUserResponse::from(&user))
    }

    async fn load_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}

/// Build the identifying value objects, reporting every invalid one at once
fn parse_identity(
    nickname: &str,
    name: &str,
    surname: &str,
    email: &str,
) -> ServiceResult<(Nickname, FullName, Email)> {
    let nickname = Nickname::create(nickname);
    let full_name = FullName::create(name, surname);
    let email = Email::create(email);

    if let Some(err) = ServiceError::combine([
        nickname.as_ref().err().cloned(),
        full_name.as_ref().err().cloned(),
        email.as_ref().err().cloned(),
    ]) {
        return Err(err);
    }

    Ok((nickname?, full_name?, email?))
}
