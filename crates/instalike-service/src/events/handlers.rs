//! Built-in event handlers

use std::sync::Arc;

use async_trait::async_trait;
use instalike_common::SiteConfig;
use instalike_core::traits::{NotificationRepository, UserRepository};
use instalike_core::{DomainEvent, Entity, Nickname, Notification, Snowflake};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::services::{ServiceError, ServiceResult};

use super::EventHandler;

// ============================================================================
// Notification messages
// ============================================================================

/// Anchor to the sender's profile; the nickname is escaped for HTML
fn profile_link(site: &SiteConfig, sender: &Nickname) -> String {
    format!(
        "<a href=\"{}\">{}</a>",
        html_escape::encode_double_quoted_attribute(&site.profile_url(sender.as_str())),
        html_escape::encode_safe(sender.as_str())
    )
}

fn post_link(site: &SiteConfig, post_id: Snowflake, label: &str) -> String {
    format!(
        "<a href=\"{}\">{label}</a>",
        html_escape::encode_double_quoted_attribute(&site.post_url(post_id))
    )
}

/// `<a href="{profile}">{nick}</a> liked your <a href="{post}">post.</a>`
pub fn like_message(site: &SiteConfig, sender: &Nickname, post_id: Snowflake) -> String {
    format!(
        "{} liked your {}",
        profile_link(site, sender),
        post_link(site, post_id, "post.")
    )
}

pub fn comment_message(site: &SiteConfig, sender: &Nickname, post_id: Snowflake) -> String {
    format!(
        "{} wrote a comment {}",
        profile_link(site, sender),
        post_link(site, post_id, "about your post.")
    )
}

pub fn follow_message(site: &SiteConfig, sender: &Nickname) -> String {
    format!("{} started following you.", profile_link(site, sender))
}

// ============================================================================
// Notification Handler
// ============================================================================

/// Writes a notification for the user affected by a like, comment or follow
pub struct NotificationHandler {
    users: Arc<dyn UserRepository>,
    notifications: Arc<dyn NotificationRepository>,
    site: SiteConfig,
}

impl NotificationHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        notifications: Arc<dyn NotificationRepository>,
        site: SiteConfig,
    ) -> Self {
        Self {
            users,
            notifications,
            site,
        }
    }

    async fn notify(
        &self,
        sender_id: Snowflake,
        recipient_id: Snowflake,
        message: String,
    ) -> ServiceResult<()> {
        // Users are never told about their own actions
        if sender_id == recipient_id {
            debug!(user_id = %sender_id, "Skipping self notification");
            return Ok(());
        }

        let sender = self
            .users
            .find_by_id(sender_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", sender_id.to_string()))?;
        let recipient = self
            .users
            .find_by_id(recipient_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", recipient_id.to_string()))?;

        let mut notification = Notification::new(&sender, recipient.entity_ref(), message);
        let notification_id = self.notifications.save(&mut notification).await?;

        info!(
            notification_id = %notification_id,
            sender_id = %sender_id,
            sender_nickname = %sender.nickname(),
            recipient_id = %recipient_id,
            "Notification sent"
        );

        Ok(())
    }
}

#[async_trait]
impl EventHandler for NotificationHandler {
    fn name(&self) -> &'static str {
        "notifications"
    }

    async fn handle(&self, event: &DomainEvent) -> ServiceResult<()> {
        match event {
            DomainEvent::PostLiked(e) => {
                let message = like_message(&self.site, &e.user_nickname, e.post_id);
                self.notify(e.user_id, e.post_author_id, message).await
            }
            DomainEvent::CommentPublished(e) => {
                let message = comment_message(&self.site, &e.author_nickname, e.post_id);
                self.notify(e.author_id, e.post_author_id, message).await
            }
            DomainEvent::UserFollowed(e) => {
                let message = follow_message(&self.site, &e.follower_nickname);
                self.notify(e.follower_id, e.followed_id, message).await
            }
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Audit Log Handler
// ============================================================================

/// Records account activity in the application log
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditLogHandler;

#[async_trait]
impl EventHandler for AuditLogHandler {
    fn name(&self) -> &'static str {
        "audit"
    }

    async fn handle(&self, event: &DomainEvent) -> ServiceResult<()> {
        match event {
            DomainEvent::UserRegistered(e) => {
                info!(user_id = %e.user_id, nickname = %e.nickname, "User [{}] has registered.", e.nickname);
            }
            DomainEvent::UserLoggedIn(e) => {
                info!(user_id = %e.user_id, nickname = %e.nickname, "User [{}({})] has just logged in.", e.nickname, e.user_id);
            }
            DomainEvent::UserLoggedOut(e) => {
                info!(user_id = %e.user_id, nickname = %e.nickname, "User [{}({})] has just logged out.", e.nickname, e.user_id);
            }
            other => {
                debug!(event_type = other.event_type(), actor_id = %other.actor_id(), "Domain event");
            }
        }
        Ok(())
    }
}

// ============================================================================
// Event Recorder
// ============================================================================

/// Keeps every dispatched event in memory, for inspection in tests
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Mutex<Vec<DomainEvent>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events, oldest first
    pub async fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().await.clone()
    }

    pub async fn event_types(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .await
            .iter()
            .map(DomainEvent::event_type)
            .collect()
    }

    pub async fn clear(&self) {
        self.events.lock().await.clear();
    }
}

#[async_trait]
impl EventHandler for EventRecorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    async fn handle(&self, event: &DomainEvent) -> ServiceResult<()> {
        self.events.lock().await.push(event.clone());
        Ok(())
    }
}
