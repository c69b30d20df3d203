//! # instalike-service
//!
//! Application layer containing use-case services, DTOs, domain event
//! dispatch and in-memory repository adapters.

pub mod dto;
pub mod events;
pub mod memory;
pub mod services;

pub use events::{EventDispatcher, EventHandler};
pub use memory::in_memory_context;
pub use services::{
    AccountService, NotificationService, PostService, ServiceContext, ServiceError, ServiceResult,
    SocialService,
};
