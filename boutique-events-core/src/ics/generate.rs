//! ICS file generation.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use ics::properties::{CalScale, Description, DtEnd, DtStart, Location, Summary};
use ics::{ICalendar, escape_text};
use tracing::info;

use crate::error::{EventsError, EventsResult};
use crate::event::EventRecord;
use crate::time::{event_span_utc, format_utc_stamp};

pub const DEFAULT_PRODID: &str = "-//Cedar & Oak Boutique//Events//EN";
pub const DEFAULT_UID_DOMAIN: &str = "cedarandoakboutique.com";

/// Settings for a calendar export.
#[derive(Debug, Clone)]
pub struct IcsOptions {
    pub prodid: String,
    /// Appended to each event id to build a globally unique UID
    pub uid_domain: String,
    /// Timezone the events' wall-clock times are written in
    pub timezone: Tz,
    /// DTSTAMP for every event
    pub dtstamp: DateTime<Utc>,
}

impl Default for IcsOptions {
    fn default() -> Self {
        IcsOptions {
            prodid: DEFAULT_PRODID.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            timezone: Tz::UTC,
            dtstamp: Utc::now(),
        }
    }
}

/// Generate .ics content for every event in the collection.
pub fn generate_ics(events: &[EventRecord], options: &IcsOptions) -> EventsResult<String> {
    let mut calendar = ICalendar::new("2.0", options.prodid.as_str());
    calendar.push(CalScale::new("GREGORIAN"));

    let dtstamp = format_utc_stamp(options.dtstamp);

    for event in events {
        let (start, end) = event_span_utc(event, options.timezone);

        let uid = format!("{}@{}", event.id, options.uid_domain);
        let mut ics_event = ics::Event::new(uid, dtstamp.clone());

        ics_event.push(DtStart::new(format_utc_stamp(start)));
        ics_event.push(DtEnd::new(format_utc_stamp(end)));
        ics_event.push(Summary::new(escape_text(event.title.as_str())));
        ics_event.push(Description::new(escape_text(event.description.as_str())));
        ics_event.push(Location::new(escape_text(event.location.as_str())));

        calendar.add_event(ics_event);
    }

    let mut buffer = Vec::new();
    calendar
        .write(&mut buffer)
        .map_err(|e| EventsError::IcsGenerate(e.to_string()))?;
    let output = String::from_utf8(buffer).map_err(|e| EventsError::IcsGenerate(e.to_string()))?;

    info!(events = events.len(), "Generated iCal export");

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::parse_time;
    use chrono::{NaiveDate, TimeZone};

    fn make_test_event() -> EventRecord {
        let mut event = EventRecord::new(
            "trunk-show-2024",
            "Trunk Show Weekend",
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        );
        event.time = Some(parse_time("18:00").unwrap());
        event.description = "Meet the designers".to_string();
        event.location = "Main Street Store".to_string();
        event
    }

    fn make_test_options() -> IcsOptions {
        IcsOptions {
            dtstamp: Utc.with_ymd_and_hms(2024, 5, 20, 9, 30, 0).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_ics_calendar_header() {
        let ics = generate_ics(&[], &make_test_options()).unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"), "ICS:\n{}", ics);
        assert!(ics.contains("VERSION:2.0\r\n"), "ICS:\n{}", ics);
        assert!(
            ics.contains("PRODID:-//Cedar & Oak Boutique//Events//EN\r\n"),
            "ICS:\n{}",
            ics
        );
        assert!(ics.contains("CALSCALE:GREGORIAN\r\n"), "ICS:\n{}", ics);
        assert!(ics.trim_end().ends_with("END:VCALENDAR"), "ICS:\n{}", ics);
        assert!(!ics.contains("BEGIN:VEVENT"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_ics_event_fields() {
        let ics = generate_ics(&[make_test_event()], &make_test_options()).unwrap();

        for expected in [
            "UID:trunk-show-2024@cedarandoakboutique.com",
            "DTSTAMP:20240520T093000Z",
            "DTSTART:20240601T180000Z",
            "SUMMARY:Trunk Show Weekend",
            "DESCRIPTION:Meet the designers",
            "LOCATION:Main Street Store",
        ] {
            assert!(ics.contains(expected), "Missing {}. ICS:\n{}", expected, ics);
        }
    }

    #[test]
    fn test_generate_ics_default_duration_is_two_hours() {
        let ics = generate_ics(&[make_test_event()], &make_test_options()).unwrap();

        assert!(
            ics.contains("DTEND:20240601T200000Z"),
            "DTEND should be start + 2 hours. ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_generate_ics_uses_end_time() {
        let mut event = make_test_event();
        event.end_time = Some(parse_time("21:15").unwrap());

        let ics = generate_ics(&[event], &make_test_options()).unwrap();

        assert!(ics.contains("DTEND:20240601T211500Z"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_ics_escapes_text_values() {
        let mut event = make_test_event();
        event.title = "Tea, Treats; Trends".to_string();
        event.description = "Line one\nLine two".to_string();
        event.location = "Suite 5\\B".to_string();

        let ics = generate_ics(&[event], &make_test_options()).unwrap();

        assert!(
            ics.contains(r"SUMMARY:Tea\, Treats\; Trends"),
            "SUMMARY should escape comma and semicolon. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains(r"DESCRIPTION:Line one\nLine two"),
            "DESCRIPTION should escape newlines. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains(r"LOCATION:Suite 5\\B"),
            "LOCATION should escape backslashes. ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_generate_ics_one_vevent_per_record() {
        let mut second = make_test_event();
        second.id = "fall-workshop".to_string();
        second.title = "Fall Workshop".to_string();

        let ics = generate_ics(&[make_test_event(), second], &make_test_options()).unwrap();

        let count = ics.lines().filter(|l| *l == "BEGIN:VEVENT").count();
        assert_eq!(count, 2, "ICS:\n{}", ics);
        assert!(ics.contains("UID:fall-workshop@cedarandoakboutique.com"));
    }

    #[test]
    fn test_generate_ics_respects_timezone_and_uid_domain() {
        let options = IcsOptions {
            timezone: chrono_tz::Europe::Berlin,
            uid_domain: "example.org".to_string(),
            ..make_test_options()
        };

        let ics = generate_ics(&[make_test_event()], &options).unwrap();

        // 18:00 CEST is 16:00 UTC
        assert!(ics.contains("DTSTART:20240601T160000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("UID:trunk-show-2024@example.org"), "ICS:\n{}", ics);
    }
}
