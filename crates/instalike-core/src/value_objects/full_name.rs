//! Full name value object (given name + surname)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomainError, DomainResult};

/// A person's name, kept as its two parts
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFullName")]
pub struct FullName {
    name: String,
    surname: String,
}

impl FullName {
    pub const MAX_PART_LEN: usize = 100;

    /// Build a full name from its parts
    pub fn create(name: &str, surname: &str) -> DomainResult<Self> {
        let name = Self::validate_part(name, "Name")?;
        let surname = Self::validate_part(surname, "Surname")?;
        Ok(Self { name, surname })
    }

    /// Parse `"Name Surname"`, splitting at the first whitespace
    ///
    /// Everything after the first whitespace belongs to the surname, so
    /// `"Test User New"` has surname `"User New"`.
    pub fn parse(value: &str) -> DomainResult<Self> {
        let value = value.trim();
        match value.split_once(char::is_whitespace) {
            Some((name, surname)) => Self::create(name, surname),
            None => Err(DomainError::InvalidFullName(
                "Full name must contain both name and surname".to_string(),
            )),
        }
    }

    fn validate_part(value: &str, label: &str) -> DomainResult<String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(DomainError::InvalidFullName(format!(
                "{label} cannot be empty"
            )));
        }
        if value.chars().count() > Self::MAX_PART_LEN {
            return Err(DomainError::InvalidFullName(format!(
                "{label} cannot be longer than {} characters",
                Self::MAX_PART_LEN
            )));
        }
        Ok(value.to_string())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn surname(&self) -> &str {
        &self.surname
    }
}

#[derive(Deserialize)]
struct RawFullName {
    name: String,
    surname: String,
}

impl TryFrom<RawFullName> for FullName {
    type Error = DomainError;

    fn try_from(raw: RawFullName) -> Result<Self, Self::Error> {
        Self::create(&raw.name, &raw.surname)
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.surname)
    }
}

impl TryFrom<&str> for FullName {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<FullName> for String {
    fn from(full_name: FullName) -> Self {
        full_name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_from_parts() {
        let full_name = FullName::create(" Test ", "User").unwrap();
        assert_eq!(full_name.name(), "Test");
        assert_eq!(full_name.surname(), "User");
        assert_eq!(full_name.to_string(), "Test User");
    }

    #[test]
    fn test_empty_parts_rejected() {
        assert!(matches!(
            FullName::create("", "User"),
            Err(DomainError::InvalidFullName(_))
        ));
        assert!(FullName::create("Test", "  ").is_err());
    }

    #[test]
    fn test_parse_splits_at_first_whitespace() {
        let full_name = FullName::parse("Test User New").unwrap();
        assert_eq!(full_name.name(), "Test");
        assert_eq!(full_name.surname(), "User New");
        assert_eq!(full_name, FullName::create("Test", "User New").unwrap());
    }

    #[test]
    fn test_deserialize_validates_parts() {
        let full_name: FullName =
            serde_json::from_str(r#"{"name":"Mary Ann","surname":"Smith"}"#).unwrap();
        assert_eq!(full_name.name(), "Mary Ann");
        assert!(serde_json::from_str::<FullName>(r#"{"name":"","surname":"Smith"}"#).is_err());
    }

    #[test]
    fn test_parse_single_word_rejected() {
        assert!(FullName::parse("Test").is_err());
        assert!(FullName::parse("").is_err());
    }
}
