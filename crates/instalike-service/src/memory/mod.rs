//! In-memory repository adapters
//!
//! `DashMap`-backed implementations of the repository ports. Ids come from a
//! shared [`SnowflakeGenerator`]. Aggregates are stored and returned by
//! value, so callers always work on their own copy.

mod notification_repo;
mod post_repo;
mod user_repo;

use std::sync::Arc;

use instalike_common::AppConfig;
use instalike_core::SnowflakeGenerator;

use crate::events::{AuditLogHandler, EventDispatcher, EventHandler, NotificationHandler};
use crate::services::ServiceContext;

pub use notification_repo::InMemoryNotificationRepository;
pub use post_repo::InMemoryPostRepository;
pub use user_repo::InMemoryUserRepository;

/// Build a fully wired context over fresh in-memory repositories
///
/// Registers the audit and notification handlers, then any `extra_handlers`
/// in order.
pub fn in_memory_context(
    config: AppConfig,
    extra_handlers: Vec<Arc<dyn EventHandler>>,
) -> ServiceContext {
    let generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let users = Arc::new(InMemoryUserRepository::new(generator.clone()));
    let posts = Arc::new(InMemoryPostRepository::new(generator.clone()));
    let notifications = Arc::new(InMemoryNotificationRepository::new(generator));

    let mut dispatcher = EventDispatcher::new()
        .with_handler(Arc::new(AuditLogHandler))
        .with_handler(Arc::new(NotificationHandler::new(
            users.clone(),
            notifications.clone(),
            config.site.clone(),
        )));
    for handler in extra_handlers {
        dispatcher = dispatcher.with_handler(handler);
    }

    ServiceContext::new(
        users,
        posts,
        notifications,
        Arc::new(dispatcher),
        Arc::new(config),
    )
}
