//! Error types for boutique-events.

use thiserror::Error;

/// Errors that can occur while loading, editing or exporting events.
#[derive(Error, Debug)]
pub enum EventsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse events document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to fetch events document: {0}")]
    Fetch(String),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("An event with id '{0}' already exists")]
    DuplicateId(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for EventsError {
    fn from(err: reqwest::Error) -> Self {
        EventsError::Fetch(err.to_string())
    }
}

/// Result type alias for event operations.
pub type EventsResult<T> = Result<T, EventsError>;
