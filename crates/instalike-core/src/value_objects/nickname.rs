//! Nickname - the public handle used for login and profile URLs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomainError, DomainResult};

/// A user's unique public handle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nickname(String);

impl Nickname {
    pub const MAX_LEN: usize = 30;

    /// Validate and build a nickname
    ///
    /// Surrounding whitespace is trimmed; the result must be non-empty, at
    /// most [`Nickname::MAX_LEN`] characters and free of inner whitespace.
    pub fn create(value: &str) -> DomainResult<Self> {
        let value = value.trim();

        if value.is_empty() {
            return Err(DomainError::InvalidNickname(
                "Nickname cannot be empty".to_string(),
            ));
        }
        if value.chars().count() > Self::MAX_LEN {
            return Err(DomainError::InvalidNickname(format!(
                "Nickname cannot be longer than {} characters",
                Self::MAX_LEN
            )));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidNickname(
                "Nickname cannot contain spaces".to_string(),
            ));
        }

        Ok(Self(value.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Nickname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Nickname {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::create(value)
    }
}

impl TryFrom<String> for Nickname {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::create(&value)
    }
}

impl From<Nickname> for String {
    fn from(nickname: Nickname) -> Self {
        nickname.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_nickname_is_trimmed() {
        let nickname = Nickname::create("  user1 ").unwrap();
        assert_eq!(nickname.as_str(), "user1");
        assert_eq!(nickname.to_string(), "user1");
    }

    #[test]
    fn test_empty_nickname_rejected() {
        assert!(matches!(
            Nickname::create("   "),
            Err(DomainError::InvalidNickname(_))
        ));
    }

    #[test]
    fn test_nickname_with_spaces_rejected() {
        let err = Nickname::create("user one").unwrap_err();
        assert!(err.to_string().contains("spaces"));
    }

    #[test]
    fn test_nickname_too_long_rejected() {
        assert!(Nickname::create(&"a".repeat(Nickname::MAX_LEN)).is_ok());
        assert!(Nickname::create(&"a".repeat(Nickname::MAX_LEN + 1)).is_err());
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(
            Nickname::create("user1").unwrap(),
            Nickname::try_from("user1").unwrap()
        );
        assert_ne!(
            Nickname::create("user1").unwrap(),
            Nickname::create("user2").unwrap()
        );
    }

    #[test]
    fn test_serde_goes_through_validation() {
        let nickname: Nickname = serde_json::from_str("\"user1\"").unwrap();
        assert_eq!(serde_json::to_string(&nickname).unwrap(), "\"user1\"");
        assert!(serde_json::from_str::<Nickname>("\"\"").is_err());
    }
}
