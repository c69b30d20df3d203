//! Domain event dispatch
//!
//! Services emit a [`DomainEvent`](instalike_core::DomainEvent) after each
//! successful state change; the dispatcher fans it out to handlers in
//! registration order.

mod dispatcher;
mod handlers;

pub use dispatcher::{EventDispatcher, EventHandler};
pub use handlers::{
    comment_message, follow_message, like_message, AuditLogHandler, EventRecorder,
    NotificationHandler,
};
