//! Service context - dependency container for services
//!
//! Holds all repositories, the event dispatcher, and configuration needed by services.

use std::sync::Arc;

use instalike_common::{AppConfig, AppError, PasswordPolicy};
use instalike_core::traits::{NotificationRepository, PostRepository, UserRepository};
use instalike_core::{DomainEvent, Picture, Snowflake};
use tracing::warn;

use crate::dto::NicknameDirectory;
use crate::events::EventDispatcher;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories for users, posts and notifications
/// - The domain event dispatcher
/// - Application configuration and the password policy derived from it
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    notification_repo: Arc<dyn NotificationRepository>,

    // Events
    dispatcher: Arc<EventDispatcher>,

    // Configuration
    config: Arc<AppConfig>,
    password_policy: PasswordPolicy,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        post_repo: Arc<dyn PostRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        dispatcher: Arc<EventDispatcher>,
        config: Arc<AppConfig>,
    ) -> Self {
        let password_policy = PasswordPolicy::from_security(&config.security);

        Self {
            user_repo,
            post_repo,
            notification_repo,
            dispatcher,
            config,
            password_policy,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the notification repository
    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    // === Events ===

    /// Dispatch `event` for a change that is already saved
    ///
    /// Handler failures are logged and never reach the caller.
    pub async fn publish(&self, event: DomainEvent) {
        if let Err(err) = self.dispatcher.dispatch(&event).await {
            warn!(
                event_type = event.event_type(),
                actor_id = %event.actor_id(),
                error = %err,
                "Event handling failed after commit"
            );
        }
    }

    // === Lookups ===

    /// Load the current nicknames of `ids`
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if any user no longer exists
    pub async fn nicknames(
        &self,
        ids: impl IntoIterator<Item = Snowflake>,
    ) -> ServiceResult<NicknameDirectory> {
        let mut directory = NicknameDirectory::new();
        for id in ids {
            if directory.contains(id) {
                continue;
            }
            let user = self
                .user_repo
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::not_found("User", id.to_string()))?;
            directory.insert(&user);
        }
        Ok(directory)
    }

    // === Configuration ===

    pub fn config(&self) -> &AppConfig {
        self.config.as_ref()
    }

    pub fn password_policy(&self) -> &PasswordPolicy {
        &self.password_policy
    }

    /// Decode an uploaded base64 picture and enforce the configured size limit
    pub fn decode_picture(&self, encoded: &str) -> ServiceResult<Picture> {
        let picture = Picture::from_base64(encoded)?;
        let limit = self.config.media.max_picture_bytes();
        if picture.len() > limit {
            return Err(ServiceError::App(AppError::PayloadTooLarge(format!(
                "picture is {} bytes, limit is {limit}",
                picture.len()
            ))));
        }
        Ok(picture)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("dispatcher", &self.dispatcher)
            .field("app", &self.config.app.name)
            .finish()
    }
}
