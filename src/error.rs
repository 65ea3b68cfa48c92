//! Error types for subword-embed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubwordError {
    // Label file errors
    #[error("Malformed label line '{line}': {message}")]
    Format { line: String, message: String },

    #[error("Invalid subword context width {width}: must be between 1 and 3")]
    InvalidContextWidth { width: usize },

    #[error("Subword label '{label}' splits into {parts} parts, expected 1 or 3")]
    InvalidLabelShape { label: String, parts: usize },

    // Visualisation errors
    #[error("No display label mapped for subword '{token}'")]
    UnmappedLabel { token: String },

    #[error("Malformed embedding file: {message}")]
    EmbeddingFormat { message: String },

    // Embedding trainer errors
    #[error("Embedding trainer failed: {message}")]
    Trainer { message: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SubwordError>;

impl SubwordError {
    /// Build a [`SubwordError::Format`] for the offending line.
    pub fn format(line: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            line: line.into(),
            message: message.into(),
        }
    }
}
