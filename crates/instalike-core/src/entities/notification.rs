//! Notification entity - message delivered to a user about someone else's action

use chrono::{DateTime, Utc};

use crate::entities::{entity_equality, Entity, EntityRef, Identity, User};
use crate::value_objects::Snowflake;

#[derive(Debug, Clone)]
pub struct Notification {
    identity: Identity<Snowflake>,
    sender: EntityRef<Snowflake>,
    recipient: EntityRef<Snowflake>,
    message: String,
    created_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Create an unread notification; `message` is an HTML fragment
    pub fn new(sender: &User, recipient: EntityRef<Snowflake>, message: impl Into<String>) -> Self {
        Self {
            identity: Identity::transient(),
            sender: sender.entity_ref(),
            recipient,
            message: message.into(),
            created_at: Utc::now(),
            read_at: None,
        }
    }

    pub fn sender(&self) -> EntityRef<Snowflake> {
        self.sender
    }

    pub fn recipient(&self) -> EntityRef<Snowflake> {
        self.recipient
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn read_at(&self) -> Option<DateTime<Utc>> {
        self.read_at
    }

    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    /// Mark as read; the first read time is kept on repeated calls
    pub fn mark_as_read(&mut self) {
        if self.read_at.is_none() {
            self.read_at = Some(Utc::now());
        }
    }

    pub fn is_for(&self, user: &User) -> bool {
        self.recipient.refers_to(user)
    }
}

impl Entity for Notification {
    type Id = Snowflake;

    fn identity(&self) -> &Identity<Snowflake> {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity<Snowflake> {
        &mut self.identity
    }
}

entity_equality!(Notification);
