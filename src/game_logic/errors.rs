use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EchoError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("Failed to read or write a file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    // Level-related errors
    #[error("Level file not found at path: {path}")]
    LevelFileNotFound { path: PathBuf },

    #[error("Failed to parse level: {0}")]
    LevelParseFailed(#[from] serde_json::Error),

    #[error("Malformed level: {reason}")]
    MalformedLevel { reason: String },
}

/// Result type alias for all operations
pub type EchoResult<T> = Result<T, EchoError>;
