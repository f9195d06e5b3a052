//! Homepage preview and events-page grid.
//!
//! Selection here never re-sorts: output follows the order of the events
//! document.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::event::EventRecord;

/// Number of events shown in the homepage preview.
pub const DEFAULT_FEATURED_LIMIT: usize = 2;

pub const NO_UPCOMING_EVENTS: &str = "No upcoming events at this time. Check back soon!";

/// Events for the homepage preview.
///
/// Prefers records flagged `featured`; when none are flagged, falls back to the
/// first `limit` records.
pub fn featured_preview(events: &[EventRecord], limit: usize) -> Vec<&EventRecord> {
    let featured: Vec<&EventRecord> = events.iter().filter(|e| e.featured).take(limit).collect();

    if featured.is_empty() {
        events.iter().take(limit).collect()
    } else {
        featured
    }
}

/// Events dated today or later.
pub fn upcoming(events: &[EventRecord], today: NaiveDate) -> Vec<&EventRecord> {
    events.iter().filter(|e| e.date >= today).collect()
}

/// Compact card shown in the preview and the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCard {
    pub id: String,
    pub day: u32,
    /// Short month name (`Jun`)
    pub month: String,
    pub title: String,
    pub time: String,
    pub description: String,
}

impl EventCard {
    pub fn from_record(event: &EventRecord) -> Self {
        EventCard {
            id: event.id.clone(),
            day: event.date.day(),
            month: event.date.format("%b").to_string(),
            title: event.title.clone(),
            time: format_time(event.time, event.end_time),
            description: event.description.clone(),
        }
    }
}

/// Long date, e.g. `Saturday, June 1, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// 12-hour time range, e.g. `6:00 PM - 8:00 PM`.
pub fn format_time(time: Option<NaiveTime>, end_time: Option<NaiveTime>) -> String {
    let Some(start) = time else {
        return "All day".to_string();
    };

    let start = format_clock(start);
    match end_time {
        Some(end) => format!("{} - {}", start, format_clock(end)),
        None => start,
    }
}

fn format_clock(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::parse_time;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_test_events(featured: &[usize]) -> Vec<EventRecord> {
        (0..5)
            .map(|i| {
                let day = date(2024, 6, 1 + i as u32);
                let mut event = EventRecord::new(format!("evt-{i}"), format!("Event {i}"), day);
                event.featured = featured.contains(&i);
                event
            })
            .collect()
    }

    fn ids(events: Vec<&EventRecord>) -> Vec<&str> {
        events.into_iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_featured_preview_prefers_flagged_events() {
        let events = make_test_events(&[1, 4]);

        let preview = featured_preview(&events, DEFAULT_FEATURED_LIMIT);

        assert_eq!(ids(preview), vec!["evt-1", "evt-4"]);
    }

    #[test]
    fn test_featured_preview_falls_back_to_first_events() {
        let events = make_test_events(&[]);

        let preview = featured_preview(&events, DEFAULT_FEATURED_LIMIT);

        assert_eq!(ids(preview), vec!["evt-0", "evt-1"]);
    }

    #[test]
    fn test_featured_preview_is_bounded() {
        let events = make_test_events(&[0, 2, 3]);

        assert_eq!(ids(featured_preview(&events, 2)), vec!["evt-0", "evt-2"]);
        assert!(featured_preview(&[], 2).is_empty());
    }

    #[test]
    fn test_upcoming_includes_today_and_keeps_source_order() {
        let mut events = make_test_events(&[]);
        events.swap(3, 4);

        let upcoming = upcoming(&events, date(2024, 6, 3));

        assert_eq!(ids(upcoming), vec!["evt-2", "evt-4", "evt-3"]);
    }

    #[test]
    fn test_upcoming_excludes_past_events() {
        let events = make_test_events(&[]);
        assert!(upcoming(&events, date(2024, 7, 1)).is_empty());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(2024, 6, 1)), "Saturday, June 1, 2024");
        assert_eq!(format_date(date(2024, 12, 25)), "Wednesday, December 25, 2024");
    }

    #[test]
    fn test_format_time() {
        let six_pm = parse_time("18:00").ok();
        let eight_thirty = parse_time("20:30").ok();
        let morning = parse_time("09:05").ok();

        assert_eq!(format_time(six_pm, None), "6:00 PM");
        assert_eq!(format_time(six_pm, eight_thirty), "6:00 PM - 8:30 PM");
        assert_eq!(format_time(morning, None), "9:05 AM");
        assert_eq!(format_time(None, eight_thirty), "All day");
    }

    #[test]
    fn test_event_card_from_record() {
        let mut event = EventRecord::new("evt-1", "Fall Workshop", date(2024, 9, 14));
        event.time = parse_time("10:00").ok();
        event.description = "Layering basics".to_string();

        let card = EventCard::from_record(&event);

        assert_eq!(card.day, 14);
        assert_eq!(card.month, "Sep");
        assert_eq!(card.time, "10:00 AM");
        assert_eq!(card.description, "Layering basics");
    }
}
