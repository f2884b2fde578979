use thiserror::Error;

use crate::store::TRENDING_MOVIES_KEY;

#[derive(Error, Debug)]
pub enum MarqueeError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("KV namespace {} is not configured", TRENDING_MOVIES_KEY)]
    StoreNotConfigured,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MarqueeError>;
