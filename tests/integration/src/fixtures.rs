//! Test fixtures and data generators
//!
//! Provides reusable request data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use instalike_core::Snowflake;
use instalike_service::dto::{PublishCommentRequest, PublishPostRequest, RegisterUserRequest};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Password shared by every fixture account
pub const TEST_PASSWORD: &str = "TestPass123";

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request with a fresh nickname and email
pub fn unique_registration() -> RegisterUserRequest {
    registration(&format!("user{}", unique_suffix()))
}

/// Registration request for `nickname`
pub fn registration(nickname: &str) -> RegisterUserRequest {
    RegisterUserRequest {
        nickname: nickname.to_string(),
        name: "Test".to_string(),
        surname: "User".to_string(),
        email: format!("{nickname}@example.com"),
        password: TEST_PASSWORD.to_string(),
        biography: Some(format!("Hi, I am {nickname}")),
        profile_picture: None,
    }
}

/// Base64 payload of `len` arbitrary bytes
pub fn picture_payload(len: usize) -> String {
    let bytes: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
    STANDARD.encode(bytes)
}

/// Post with a small picture
pub fn post_request(author_id: Snowflake, text: &str) -> PublishPostRequest {
    PublishPostRequest {
        author_id,
        picture: picture_payload(64),
        text: text.to_string(),
    }
}

pub fn comment_request(post_id: Snowflake, author_id: Snowflake, text: &str) -> PublishCommentRequest {
    PublishCommentRequest {
        post_id,
        author_id,
        text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_registrations_differ() {
        let first = unique_registration();
        let second = unique_registration();
        assert_ne!(first.nickname, second.nickname);
        assert_ne!(first.email, second.email);
    }

    #[test]
    fn test_picture_payload_decodes_to_length() {
        let decoded = STANDARD.decode(picture_payload(10)).unwrap();
        assert_eq!(decoded.len(), 10);
    }
}
