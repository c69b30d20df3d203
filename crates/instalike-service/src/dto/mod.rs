//! Data transfer objects for use-case inputs and outputs
//!
//! This module provides:
//! - Request DTOs with validation for inputs
//! - Response DTOs for serializing outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use mappers::NicknameDirectory;

// Re-export commonly used request types
pub use requests::{
    ChangePasswordRequest, EditUserDetailsRequest, LoginRequest, PublishCommentRequest,
    PublishPostRequest, RegisterUserRequest,
};

// Re-export commonly used response types
pub use responses::{
    ApiResponse, CommentResponse, CurrentUserResponse, NotificationResponse, PostResponse,
    ProfileResponse,
};
