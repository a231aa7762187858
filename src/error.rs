//! Error types for Avskrift.

use thiserror::Error;

/// Library-level error type for Avskrift operations.
#[derive(Error, Debug)]
pub enum AvskriftError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Video listing failed: {0}")]
    Listing(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for Avskrift operations.
pub type Result<T> = std::result::Result<T, AvskriftError>;
