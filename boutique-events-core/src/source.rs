//! Loading the events document.
//!
//! Every consumer loads the document on its own: one attempt, no retry, no
//! shared cache. Two loads can therefore see different versions of the source.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, error};
use url::Url;

use crate::error::{EventsError, EventsResult};
use crate::event::{EventRecord, EventsDocument};
use crate::store::{EventStore, ensure_unique_ids};

/// Relative path of the events document when nothing else is configured.
pub const DEFAULT_SOURCE: &str = "data/events.json";

/// Where the events document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSource {
    Path(PathBuf),
    Url(Url),
}

impl Default for EventSource {
    fn default() -> Self {
        EventSource::Path(PathBuf::from(DEFAULT_SOURCE))
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventSource::Path(path) => write!(f, "{}", path.display()),
            EventSource::Url(url) => write!(f, "{url}"),
        }
    }
}

impl EventSource {
    /// `http://` and `https://` locations are fetched over the network, anything
    /// else is read from disk.
    pub fn parse(location: &str) -> EventsResult<Self> {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            let url = Url::parse(location)
                .map_err(|e| EventsError::Config(format!("Invalid source URL '{location}': {e}")))?;
            Ok(EventSource::Url(url))
        } else if location.is_empty() {
            Err(EventsError::Config("Event source is empty".to_string()))
        } else {
            Ok(EventSource::Path(PathBuf::from(location)))
        }
    }

    /// Fetch and parse the document. Single attempt.
    ///
    /// A document that repeats an id is rejected.
    pub async fn fetch_document(&self) -> EventsResult<EventsDocument> {
        let body = match self {
            EventSource::Path(path) => {
                debug!(path = %path.display(), "Reading events document");
                tokio::fs::read_to_string(path).await?
            }
            EventSource::Url(url) => {
                debug!(%url, "Fetching events document");
                let response = reqwest::get(url.clone()).await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(EventsError::Fetch(format!("{url} returned {status}")));
                }
                response.text().await?
            }
        };

        let document: EventsDocument = serde_json::from_str(&body)?;

        ensure_unique_ids(&document.events)?;

        debug!(events = document.events.len(), "Parsed events document");
        Ok(document)
    }

    /// Load the event records, or an empty list if anything goes wrong.
    ///
    /// Failures are logged, never returned.
    pub async fn load(&self) -> Vec<EventRecord> {
        match self.fetch_document().await {
            Ok(document) => document.events,
            Err(err) => {
                error!(source = %self, "Error loading events: {err}");
                Vec::new()
            }
        }
    }

    /// [`EventSource::load`] wrapped in a store.
    pub async fn load_store(&self) -> EventStore {
        EventStore::new(self.load().await)
    }
}
