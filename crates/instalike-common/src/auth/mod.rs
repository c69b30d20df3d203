//! Authentication utilities

mod password;

pub use password::{validate_password_strength, PasswordPolicy};
