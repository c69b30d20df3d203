//! Email address value object

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::ValidateEmail;

use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn create(value: &str) -> DomainResult<Self> {
        let value = value.trim();

        if value.is_empty() {
            return Err(DomainError::InvalidEmail(
                "Email address cannot be empty".to_string(),
            ));
        }
        if !value.validate_email() {
            return Err(DomainError::InvalidEmail(format!(
                "'{value}' is not a valid email address"
            )));
        }

        Ok(Self(value.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Email {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::create(value)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::create(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
