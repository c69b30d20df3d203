//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub site: SiteConfig,
    pub media: MediaConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" | "dev" => Ok(Self::Development),
            _ => Err(()),
        }
    }
}

/// Public site settings used to build links in notifications
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl SiteConfig {
    /// Link to a user's profile page
    #[must_use]
    pub fn profile_url(&self, nickname: &str) -> String {
        format!(
            "{}/profile/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(nickname)
        )
    }

    /// Link to a single post page
    #[must_use]
    pub fn post_url(&self, post_id: impl std::fmt::Display) -> String {
        format!("{}/post/{post_id}", self.base_url.trim_end_matches('/'))
    }
}

/// Uploaded picture limits
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_max_picture_kb")]
    pub max_picture_kb: u32,
}

impl MediaConfig {
    #[must_use]
    pub fn max_picture_bytes(&self) -> usize {
        self.max_picture_kb as usize * 1024
    }
}

/// Account security settings
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Require mixed case and digits in new passwords
    #[serde(default)]
    pub strong_passwords: bool,
}

/// Log output settings
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "instalike".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_max_picture_kb() -> u32 {
    4096 // 4 MiB
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: default_env(),
            },
            site: SiteConfig {
                base_url: default_base_url(),
            },
            media: MediaConfig {
                max_picture_kb: default_max_picture_kb(),
            },
            security: SecurityConfig {
                strong_passwords: false,
            },
            logging: LoggingConfig {
                level: default_log_level(),
                json: false,
            },
            snowflake: SnowflakeConfig { worker_id: 0 },
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to a value that cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// Unset variables fall back to defaults.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` for malformed values
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            Some(raw) => raw
                .parse()
                .map_err(|()| ConfigError::InvalidValue("APP_ENV", raw))?,
            None => default_env(),
        };

        let worker_id: u16 = parse_var(&lookup, "WORKER_ID")?.unwrap_or(0);
        if worker_id > 1023 {
            return Err(ConfigError::InvalidValue(
                "WORKER_ID",
                worker_id.to_string(),
            ));
        }

        let base_url = lookup("SITE_BASE_URL").unwrap_or_else(default_base_url);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue("SITE_BASE_URL", base_url));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            site: SiteConfig { base_url },
            media: MediaConfig {
                max_picture_kb: parse_var(&lookup, "MAX_PICTURE_KB")?
                    .unwrap_or_else(default_max_picture_kb),
            },
            security: SecurityConfig {
                strong_passwords: parse_var(&lookup, "STRONG_PASSWORDS")?.unwrap_or(false),
            },
            logging: LoggingConfig {
                level: lookup("LOG_LEVEL").unwrap_or_else(default_log_level),
                json: parse_var(&lookup, "LOG_JSON")?.unwrap_or(false),
            },
            snowflake: SnowflakeConfig { worker_id },
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
