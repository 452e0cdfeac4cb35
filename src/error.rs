use crate::normalize::NormalizeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("API error: {message}")]
    Api { message: String },

    #[error("No upcoming release found for {0}")]
    NoUpcomingRelease(String),

    #[error("Numeric conversion failed: {0}")]
    Normalize(#[from] NormalizeError),
}

pub type Result<T> = std::result::Result<T, ScraperError>;
