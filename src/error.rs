use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TinyPngError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API key must not be empty")]
    MissingApiKey,

    #[error("API key contains control characters")]
    InvalidApiKey,

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Compression result carries no retrieval URL; compress an image first")]
    MissingOutputUrl,

    #[error("Invalid resize dimensions: {0}x{1}. Width and height must be positive")]
    InvalidDimensions(u32, u32),

    #[error("Unsupported resize method: {0}. Supported: fit, scale, cover, thumb")]
    UnsupportedMethod(String),

    #[error("Unknown metadata flag: {0}. Supported: copyright, creation, location")]
    UnknownMetadataFlag(String),

    #[error("{flag} metadata can only be preserved for {required} output, got {actual}")]
    MetadataNotSupported {
        flag: &'static str,
        required: &'static str,
        actual: String,
    },

    #[error("API error {status} {reason}: {code}: {message}")]
    Api {
        status: u16,
        reason: String,
        code: String,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, TinyPngError>;
