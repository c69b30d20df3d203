//! Password strength policy
//!
//! Hashing lives with the `Password` value object in the domain core; this
//! module only decides which plaintexts are acceptable for new accounts.

use crate::config::SecurityConfig;
use crate::error::AppError;

/// Rules a new plaintext password must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_len: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::basic()
    }
}

impl PasswordPolicy {
    /// Length only
    #[must_use]
    pub fn basic() -> Self {
        Self {
            min_len: 8,
            require_uppercase: false,
            require_lowercase: false,
            require_digit: false,
        }
    }

    /// Length plus mixed case and a digit
    #[must_use]
    pub fn strong() -> Self {
        Self {
            min_len: 8,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
        }
    }

    #[must_use]
    pub fn from_security(config: &SecurityConfig) -> Self {
        if config.strong_passwords {
            Self::strong()
        } else {
            Self::basic()
        }
    }

    /// Check `password` against the policy
    ///
    /// # Errors
    /// Returns `AppError::Validation` naming the first unmet rule
    pub fn check(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_len {
            return Err(AppError::Validation(format!(
                "Password must be at least {} characters long",
                self.min_len
            )));
        }

        if self.require_uppercase && !password.chars().any(char::is_uppercase) {
            return Err(AppError::Validation(
                "Password must contain at least one uppercase letter".to_string(),
            ));
        }

        if self.require_lowercase && !password.chars().any(char::is_lowercase) {
            return Err(AppError::Validation(
                "Password must contain at least one lowercase letter".to_string(),
            ));
        }

        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::Validation(
                "Password must contain at least one digit".to_string(),
            ));
        }

        Ok(())
    }
}

/// Validate password strength against [`PasswordPolicy::strong`]
///
/// # Errors
/// Returns a validation error if the password doesn't meet requirements
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    PasswordPolicy::strong().check(password)
}
