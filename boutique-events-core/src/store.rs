//! In-memory event collection.
//!
//! The store is built once from a loaded document and handed to whoever needs it.
//! Edits, imports and exports only ever touch this in-memory copy; nothing is
//! written back to the events document.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{EventsError, EventsResult};
use crate::event::{EventPatch, EventRecord, EventsDocument};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStore {
    events: Vec<EventRecord>,
}

impl EventStore {
    /// Wrap a collection, keeping source order.
    pub fn new(events: Vec<EventRecord>) -> Self {
        EventStore { events }
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Find a record by id (linear scan).
    pub fn get(&self, id: &str) -> Option<&EventRecord> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Append a record. Ids must stay unique within the collection.
    pub fn add(&mut self, record: EventRecord) -> EventsResult<()> {
        if self.get(&record.id).is_some() {
            return Err(EventsError::DuplicateId(record.id));
        }
        debug!(id = %record.id, "Adding event");
        self.events.push(record);
        Ok(())
    }

    /// Merge a patch into the record with the given id and return the result.
    pub fn update(&mut self, id: &str, patch: EventPatch) -> EventsResult<&EventRecord> {
        let record = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| EventsError::EventNotFound(id.to_string()))?;

        debug!(id, "Updating event");
        record.apply(patch);
        Ok(&*record)
    }

    /// Remove the record with the given id. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        let removed = self.events.len() != before;
        if removed {
            debug!(id, "Deleted event");
        }
        removed
    }

    /// Serialize the current collection as a pretty-printed `{ "events": [...] }` document.
    pub fn export_json(&self) -> EventsResult<String> {
        let document = EventsDocument {
            events: self.events.clone(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Replace the whole collection from an exported (or hand-written) document.
    ///
    /// The text must contain a top-level `events` array of valid records with unique
    /// ids. On any error the current collection is left untouched.
    pub fn import_json(&mut self, text: &str) -> EventsResult<usize> {
        let events = parse_import(text)?;
        let count = events.len();
        self.events = events;
        info!(count, "Imported events");
        Ok(count)
    }

    /// Records dated within `[start, end]`, inclusive on both ends.
    pub fn events_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&EventRecord> {
        self.events
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .collect()
    }

}

impl From<EventsDocument> for EventStore {
    fn from(document: EventsDocument) -> Self {
        EventStore::new(document.events)
    }
}

/// Ids that occur more than once, in order of their second appearance.
pub fn duplicate_ids(events: &[EventRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for event in events {
        if !seen.insert(event.id.as_str()) && !duplicates.contains(&event.id) {
            duplicates.push(event.id.clone());
        }
    }

    duplicates
}

/// Reject a collection that repeats an id.
pub(crate) fn ensure_unique_ids(events: &[EventRecord]) -> EventsResult<()> {
    let duplicates = duplicate_ids(events);
    if duplicates.is_empty() {
        return Ok(());
    }
    Err(EventsError::InvalidFormat(format!(
        "duplicate event ids: {}",
        duplicates.join(", ")
    )))
}

fn parse_import(text: &str) -> EventsResult<Vec<EventRecord>> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| EventsError::InvalidFormat(format!("not valid JSON ({e})")))?;

    let Some(events) = value.get("events").filter(|v| v.is_array()) else {
        return Err(EventsError::InvalidFormat(
            "expected a top-level \"events\" array".to_string(),
        ));
    };

    let events: Vec<EventRecord> = serde_json::from_value(events.clone())
        .map_err(|e| EventsError::InvalidFormat(format!("invalid event record ({e})")))?;

    ensure_unique_ids(&events)?;
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_test_store() -> EventStore {
        EventStore::new(vec![
            EventRecord::new("a", "Spring Preview", date(2024, 3, 1)),
            EventRecord::new("b", "Trunk Show Weekend", date(2024, 6, 1)),
            EventRecord::new("c", "Fall Workshop", date(2024, 9, 14)),
        ])
    }

    #[test]
    fn test_import_replaces_collection_exactly() {
        let mut store = make_test_store();
        let text = r#"{ "events": [
            { "id": "x", "title": "Holiday Party", "date": "2024-12-13", "time": "19:00" },
            { "id": "y", "title": "New Year Sale", "date": "2025-01-02" }
        ] }"#;

        let count = store.import_json(text).unwrap();

        assert_eq!(count, 2);
        let ids: Vec<_> = store.events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn test_import_without_events_array_leaves_collection_unchanged() {
        let mut store = make_test_store();
        let before = store.clone();

        let err = store.import_json(r#"{ "foo": 1 }"#).unwrap_err();

        assert!(matches!(err, EventsError::InvalidFormat(_)), "Got: {:?}", err);
        assert_eq!(store, before);
    }

    #[test]
    fn test_import_rejects_non_array_events_and_bad_records() {
        let mut store = make_test_store();
        let before = store.clone();

        assert!(store.import_json(r#"{ "events": {} }"#).is_err());
        assert!(store.import_json("not json").is_err());
        assert!(
            store
                .import_json(r#"{ "events": [ { "id": "x", "title": "No date" } ] }"#)
                .is_err()
        );
        assert_eq!(store, before);
    }

    #[test]
    fn test_import_rejects_duplicate_ids() {
        let mut store = make_test_store();
        let text = r#"{ "events": [
            { "id": "x", "title": "One", "date": "2024-12-13" },
            { "id": "x", "title": "Two", "date": "2024-12-14" }
        ] }"#;

        let err = store.import_json(text).unwrap_err();

        assert!(err.to_string().contains("duplicate event ids: x"), "Got: {}", err);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_export_then_import_restores_collection() {
        let mut store = make_test_store();
        let patch = EventPatch {
            featured: Some(true),
            ..Default::default()
        };
        store.update("b", patch).unwrap();

        let json = store.export_json().unwrap();
        assert!(json.starts_with("{\n  \"events\": ["), "Got:\n{}", json);

        let mut restored = EventStore::default();
        restored.import_json(&json).unwrap();
        assert_eq!(restored, store);
    }

    #[test]
    fn test_add_rejects_existing_id() {
        let mut store = make_test_store();

        let err = store
            .add(EventRecord::new("a", "Copy", date(2024, 4, 1)))
            .unwrap_err();

        assert!(matches!(err, EventsError::DuplicateId(ref id) if id == "a"));
        assert_eq!(store.len(), 3);

        store
            .add(EventRecord::new("d", "Winter Market", date(2024, 12, 1)))
            .unwrap();
        assert_eq!(store.events().last().unwrap().id, "d");
    }

    #[test]
    fn test_update_and_delete() {
        let mut store = make_test_store();

        let patch = EventPatch {
            title: Some("Fall Styling Workshop".to_string()),
            ..Default::default()
        };
        let updated = store.update("c", patch).unwrap();
        assert_eq!(updated.title, "Fall Styling Workshop");

        assert!(matches!(
            store.update("missing", EventPatch::default()),
            Err(EventsError::EventNotFound(_))
        ));

        assert!(store.delete("a"));
        assert!(!store.delete("a"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_events_in_range_is_inclusive() {
        let store = make_test_store();

        let ids: Vec<_> = store
            .events_in_range(date(2024, 3, 1), date(2024, 6, 1))
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();

        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_ids() {
        let events = vec![
            EventRecord::new("a", "One", date(2024, 1, 1)),
            EventRecord::new("b", "Two", date(2024, 1, 2)),
            EventRecord::new("a", "Three", date(2024, 1, 3)),
            EventRecord::new("a", "Four", date(2024, 1, 4)),
        ];

        assert_eq!(duplicate_ids(&events), vec!["a".to_string()]);
        assert!(duplicate_ids(&events[..2]).is_empty());
    }
}
