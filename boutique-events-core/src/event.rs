//! Event records as they appear in the events document.
//!
//! The JSON shape is `{ "events": [ { "id": ..., "title": ..., "date": "2024-06-01",
//! "time": "18:00", "endTime": "20:00", ... } ] }`. Times are local wall-clock times
//! without a timezone; a record without `time` is an all-day event.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A single store event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(default, with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub featured: bool,
}

impl EventRecord {
    /// Create an all-day record with empty description and location.
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: NaiveDate) -> Self {
        EventRecord {
            id: id.into(),
            title: title.into(),
            date,
            time: None,
            end_time: None,
            description: String::new(),
            location: String::new(),
            category: None,
            featured: false,
        }
    }

    pub fn is_all_day(&self) -> bool {
        self.time.is_none()
    }

    /// Presentation class for the event's category (`event-workshop`).
    pub fn category_class(&self) -> Option<String> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(|c| format!("event-{c}"))
    }

    /// Apply a partial update. Only fields present in the patch are overwritten.
    pub fn apply(&mut self, patch: EventPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(time) = patch.time {
            self.time = time;
        }
        if let Some(end_time) = patch.end_time {
            self.end_time = end_time;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
    }
}

/// Partial update for an existing record. The id is never patched.
///
/// `None` leaves a field alone. For the optional fields, `Some(None)` clears
/// the value, so `time: Some(None)` turns an event into an all-day one. In
/// JSON an absent key leaves the field alone and `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "hhmm::deserialize_present")]
    pub time: Option<Option<NaiveTime>>,
    #[serde(default, deserialize_with = "hhmm::deserialize_present")]
    pub end_time: Option<Option<NaiveTime>>,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub category: Option<Option<String>>,
    pub featured: Option<bool>,
}

/// Only called for keys that are present, so `null` becomes `Some(None)`.
fn deserialize_present<'de, T, D>(d: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(d).map(Some)
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }
}

/// Top-level shape of the events document, backups and import files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsDocument {
    pub events: Vec<EventRecord>,
}

/// Parse a wall-clock time written as `HH:MM` (or `HH:MM:SS`).
pub fn parse_time(s: &str) -> Result<NaiveTime, chrono::ParseError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M").or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
}

/// Format a wall-clock time the way the events document writes it.
pub fn format_time_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Serde adapter for optional `HH:MM` times. Empty strings read as absent.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => s.serialize_str(&super::format_time_hhmm(*t)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        raw.filter(|s| !s.trim().is_empty())
            .map(|s| {
                super::parse_time(&s)
                    .map_err(|e| de::Error::custom(format!("invalid time '{s}': {e}")))
            })
            .transpose()
    }

    pub fn deserialize_present<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<Option<NaiveTime>>, D::Error> {
        deserialize(d).map(Some)
    }
}
