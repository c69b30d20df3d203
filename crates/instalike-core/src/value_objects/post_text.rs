//! Free-form caption attached to a post

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomainError, DomainResult};

/// Post caption; may be empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostText(String);

impl PostText {
    pub const MAX_LEN: usize = 2000;

    pub fn create(value: &str) -> DomainResult<Self> {
        if value.chars().count() > Self::MAX_LEN {
            return Err(DomainError::ContentTooLong { max: Self::MAX_LEN });
        }
        Ok(Self(value.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PostText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PostText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for PostText {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::create(value)
    }
}

impl TryFrom<String> for PostText {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::create(&value)
    }
}

impl From<PostText> for String {
    fn from(text: PostText) -> Self {
        text.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_allowed() {
        let text = PostText::create("").unwrap();
        assert!(text.is_empty());
        assert_eq!(text, PostText::default());
    }

    #[test]
    fn test_text_preserved_verbatim() {
        let text = PostText::create("  sunset at the lake  ").unwrap();
        assert_eq!(text.as_str(), "  sunset at the lake  ");
    }

    #[test]
    fn test_text_length_bounded() {
        assert!(PostText::create(&"é".repeat(PostText::MAX_LEN)).is_ok());
        assert_eq!(
            PostText::create(&"x".repeat(PostText::MAX_LEN + 1)),
            Err(DomainError::ContentTooLong { max: PostText::MAX_LEN })
        );
    }
}
