//! Value objects - immutable, self-validating domain primitives

mod email;
mod full_name;
mod nickname;
mod password;
mod picture;
mod post_text;
mod snowflake;

pub use email::Email;
pub use full_name::FullName;
pub use nickname::Nickname;
pub use password::{Argon2Scheme, CredentialScheme, Password};
pub use picture::Picture;
pub use post_text::PostText;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
