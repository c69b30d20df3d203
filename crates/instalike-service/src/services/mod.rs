//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! validation, orchestration of domain operations, persistence and event
//! dispatch.

pub mod account;
pub mod context;
pub mod error;
pub mod notification;
pub mod post;
pub mod social;

// Re-export all services for convenience
pub use account::AccountService;
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use notification::NotificationService;
pub use post::PostService;
pub use social::SocialService;
