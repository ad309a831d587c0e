//! Error types for Storycast

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorycastError>;

#[derive(Error, Debug)]
pub enum StorycastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("Posts API error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl StorycastError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            StorycastError::InvalidInput(_) => 3,
            StorycastError::Api(ApiError::Authentication(_)) => 2,
            StorycastError::Api(_) => 1,
            StorycastError::Media(_) => 1,
            StorycastError::Config(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Per-file rejection reasons for media candidates.
///
/// These carry the exact user-facing wording shown next to the composer,
/// so variants format themselves rather than letting callers re-phrase.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("Unsupported file type: {mime}")]
    UnsupportedType { mime: String },

    #[error("File too large (max 10MB): {name}")]
    TooLarge { name: String, size: u64 },

    #[error("Failed to read media file {name}: {reason}")]
    Unreadable { name: String, reason: String },
}

#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Posts API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse Posts API response: {0}")]
    Parse(String),
}
