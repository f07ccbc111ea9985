use crate::normalize::NormalizeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("API error: {message}")]
    Api { message: String },

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

impl ScreenerError {
    /// True when the underlying HTTP request ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ScreenerError::Http(e) if e.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, ScreenerError>;
