//! Password credential - one-way hash with constant-time verification
//!
//! Uses Argon2id by default (OWASP recommended). The plaintext is hashed as
//! soon as a [`Password`] is created and is never stored or returned.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::fmt;

use crate::error::{DomainError, DomainResult};

/// Hashing algorithm behind [`Password`]
///
/// Implementations must be one-way and must compare digests in constant time.
pub trait CredentialScheme: Send + Sync {
    /// Hash a plaintext into a self-describing string (salt included)
    fn hash(&self, plaintext: &str) -> DomainResult<String>;

    /// Check a candidate plaintext against a hash produced by [`CredentialScheme::hash`]
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

/// Argon2id with a random salt, PHC string output
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Scheme;

impl CredentialScheme for Argon2Scheme {
    fn hash(&self, plaintext: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::PasswordHashing(e.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        // Unparseable hashes never match
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Hashed user password
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl Password {
    pub const MIN_LEN: usize = 8;

    /// Validate and hash a plaintext with the default scheme
    pub fn create(plaintext: &str) -> DomainResult<Self> {
        Self::create_with(plaintext, &Argon2Scheme)
    }

    /// Validate and hash a plaintext with the given scheme
    pub fn create_with(plaintext: &str, scheme: &dyn CredentialScheme) -> DomainResult<Self> {
        if plaintext.trim().is_empty() {
            return Err(DomainError::WeakPassword(
                "Password cannot be empty".to_string(),
            ));
        }
        if plaintext.chars().count() < Self::MIN_LEN {
            return Err(DomainError::WeakPassword(format!(
                "Password must be at least {} characters long",
                Self::MIN_LEN
            )));
        }

        Ok(Self {
            hash: scheme.hash(plaintext)?,
        })
    }

    /// Rebuild from a hash loaded from storage
    pub fn from_hash(hash: impl Into<String>) -> DomainResult<Self> {
        let hash = hash.into();
        if hash.trim().is_empty() {
            return Err(DomainError::WeakPassword(
                "Stored password hash is empty".to_string(),
            ));
        }
        Ok(Self { hash })
    }

    /// Check whether `candidate` is the plaintext this password was created from
    pub fn hash_matches(&self, candidate: &str) -> bool {
        self.hash_matches_with(candidate, &Argon2Scheme)
    }

    pub fn hash_matches_with(&self, candidate: &str, scheme: &dyn CredentialScheme) -> bool {
        scheme.verify(candidate, &self.hash)
    }

    /// Stored hash text, for persistence
    #[inline]
    pub fn as_hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}
