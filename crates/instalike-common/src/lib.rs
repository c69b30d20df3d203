//! # instalike-common
//!
//! Shared utilities including configuration, error handling, password policy, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{validate_password_strength, PasswordPolicy};
pub use config::{
    AppConfig, AppSettings, ConfigError, Environment, LoggingConfig, MediaConfig,
    SecurityConfig, SiteConfig, SnowflakeConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
