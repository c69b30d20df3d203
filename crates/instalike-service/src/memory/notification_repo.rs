//! In-memory notification repository

use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use instalike_core::traits::{NotificationRepository, RepoResult, RepositoryError};
use instalike_core::{Entity, Notification, Snowflake, SnowflakeGenerator};

pub struct InMemoryNotificationRepository {
    notifications: DashMap<Snowflake, Notification>,
    generator: Arc<SnowflakeGenerator>,
}

impl InMemoryNotificationRepository {
    pub fn new(generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            notifications: DashMap::new(),
            generator,
        }
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>> {
        Ok(self.notifications.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_recipient(&self, recipient_id: Snowflake) -> RepoResult<Vec<Notification>> {
        let mut found: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|entry| entry.value().recipient().id() == recipient_id)
            .map(|entry| entry.value().clone())
            .collect();

        found.sort_by_key(|notification| Reverse(notification.id()));
        Ok(found)
    }

    async fn save(&self, notification: &mut Notification) -> RepoResult<Snowflake> {
        if notification.is_transient() {
            notification.assign_id(self.generator.generate());
        } else if !self.notifications.contains_key(&notification.id()) {
            return Err(RepositoryError::Missing {
                entity: "Notification",
                id: notification.id(),
            });
        }

        let id = notification.id();
        self.notifications.insert(id, notification.clone());
        Ok(id)
    }
}
