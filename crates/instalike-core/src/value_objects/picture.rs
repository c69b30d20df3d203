//! Picture - binary image payload for posts and profile pictures

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;

use crate::error::{DomainError, DomainResult};

/// 1x1 transparent PNG served for users without a profile picture
const DEFAULT_PICTURE_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Image payload
///
/// [`Picture::Default`] is the sentinel every new user starts with. It never
/// equals a [`Picture::Custom`], even one holding the same bytes.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub enum Picture {
    #[default]
    Default,
    Custom(Vec<u8>),
}

impl Picture {
    /// Validate a user-supplied payload
    pub fn create(bytes: Vec<u8>) -> DomainResult<Self> {
        if bytes.is_empty() {
            return Err(DomainError::InvalidPicture(
                "Picture cannot be empty".to_string(),
            ));
        }
        Ok(Self::Custom(bytes))
    }

    /// Decode a base64 payload (as posted by browser forms)
    pub fn from_base64(encoded: &str) -> DomainResult<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| DomainError::InvalidPicture(format!("Invalid base64 payload: {e}")))?;
        Self::create(bytes)
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Raw bytes; the sentinel resolves to the built-in placeholder image
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Default => DEFAULT_PICTURE_BYTES,
            Self::Custom(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.as_bytes())
    }

    /// MIME type guessed from the magic number, if recognised
    pub fn content_type(&self) -> Option<&'static str> {
        let bytes = self.as_bytes();
        if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
            Some("image/png")
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some("image/jpeg")
        } else if bytes.starts_with(b"GIF8") {
            Some("image/gif")
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some("image/webp")
        } else {
            None
        }
    }

    /// `data:` URI for embedding into views
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type().unwrap_or("application/octet-stream"),
            self.to_base64()
        )
    }
}

impl fmt::Debug for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Picture::Default"),
            Self::Custom(bytes) => write!(f, "Picture::Custom({} bytes)", bytes.len()),
        }
    }
}

impl From<Vec<u8>> for Picture {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Custom(bytes)
    }
}

impl From<Picture> for Vec<u8> {
    fn from(picture: Picture) -> Self {
        match picture {
            Picture::Default => DEFAULT_PICTURE_BYTES.to_vec(),
            Picture::Custom(bytes) => bytes,
        }
    }
}
