//! Notification service
//!
//! Reads and acknowledges the notifications written by the event handlers.

use instalike_core::{Entity, Notification, Snowflake};
use tracing::{debug, instrument};

use crate::dto::{NicknameDirectory, NotificationResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All notifications of `user_id`, newest first
    #[instrument(skip(self))]
    pub async fn all_for(&self, user_id: Snowflake) -> ServiceResult<Vec<NotificationResponse>> {
        let notifications = self.ctx.notification_repo().find_by_recipient(user_id).await?;
        self.respond(notifications.iter()).await
    }

    /// Unread notifications of `user_id`, newest first
    #[instrument(skip(self))]
    pub async fn unread_for(&self, user_id: Snowflake) -> ServiceResult<Vec<NotificationResponse>> {
        let notifications = self.ctx.notification_repo().find_by_recipient(user_id).await?;
        self.respond(notifications.iter().filter(|notification| !notification.is_read()))
            .await
    }

    /// Mark one of `user_id`'s notifications as read
    ///
    /// Notifications addressed to someone else are reported as missing.
    #[instrument(skip(self))]
    pub async fn mark_as_read(
        &self,
        user_id: Snowflake,
        notification_id: Snowflake,
    ) -> ServiceResult<()> {
        let mut notification = self
            .ctx
            .notification_repo()
            .find_by_id(notification_id)
            .await?
            .filter(|notification| notification.recipient().id() == user_id)
            .ok_or_else(|| ServiceError::not_found("Notification", notification_id.to_string()))?;

        if notification.is_read() {
            return Ok(());
        }

        notification.mark_as_read();
        self.ctx.notification_repo().save(&mut notification).await?;

        debug!(notification_id = %notification.id(), "Notification marked as read");
        Ok(())
    }

    async fn respond<'n>(
        &self,
        notifications: impl Iterator<Item = &'n Notification> + Clone,
    ) -> ServiceResult<Vec<NotificationResponse>> {
        let directory = self
            .ctx
            .nicknames(notifications.clone().map(|notification| notification.sender().id()))
            .await?;
        Ok(notifications
            .map(|notification| NotificationResponse::new(notification, &directory))
            .collect())
    }
}
