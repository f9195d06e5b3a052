//! "Add to Google Calendar" deep links.

use chrono::Duration;
use chrono_tz::Tz;

use crate::event::EventRecord;
use crate::time::{event_span_utc, format_utc_stamp};

const GOOGLE_CALENDAR_RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// Build a Google Calendar event template URL for a single record.
///
/// Timed events use UTC timestamps (`20240601T180000Z/20240601T200000Z`). Events
/// without a start time become an all-day range ending the following day.
pub fn google_calendar_url(event: &EventRecord, tz: Tz) -> String {
    let dates = if event.is_all_day() {
        let next_day = event.date + Duration::days(1);
        format!("{}/{}", event.date.format("%Y%m%d"), next_day.format("%Y%m%d"))
    } else {
        let (start, end) = event_span_utc(event, tz);
        format!("{}/{}", format_utc_stamp(start), format_utc_stamp(end))
    };

    format!(
        "{}?action=TEMPLATE&text={}&dates={}&details={}&location={}",
        GOOGLE_CALENDAR_RENDER_URL,
        urlencoding::encode(&event.title),
        dates,
        urlencoding::encode(&event.description),
        urlencoding::encode(&event.location),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::parse_time;
    use chrono::NaiveDate;

    fn make_test_event() -> EventRecord {
        let mut event = EventRecord::new(
            "evt-1",
            "Trunk Show & Sip",
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        );
        event.time = Some(parse_time("18:00").unwrap());
        event.description = "Wine, cheese/new arrivals".to_string();
        event.location = "12 Main St".to_string();
        event
    }

    #[test]
    fn test_google_calendar_url_timed_event() {
        let url = google_calendar_url(&make_test_event(), Tz::UTC);

        assert_eq!(
            url,
            "https://calendar.google.com/calendar/render?action=TEMPLATE\
             &text=Trunk%20Show%20%26%20Sip\
             &dates=20240601T180000Z/20240601T200000Z\
             &details=Wine%2C%20cheese%2Fnew%20arrivals\
             &location=12%20Main%20St"
        );
    }

    #[test]
    fn test_google_calendar_url_uses_end_time() {
        let mut event = make_test_event();
        event.end_time = Some(parse_time("19:30").unwrap());

        let url = google_calendar_url(&event, Tz::UTC);

        assert!(
            url.contains("&dates=20240601T180000Z/20240601T193000Z&"),
            "Got: {}",
            url
        );
    }

    #[test]
    fn test_google_calendar_url_all_day_event() {
        let mut event = make_test_event();
        event.time = None;

        let url = google_calendar_url(&event, Tz::UTC);

        assert!(url.contains("&dates=20240601/20240602&"), "Got: {}", url);
    }

    #[test]
    fn test_google_calendar_url_normalizes_timezone() {
        let url = google_calendar_url(&make_test_event(), chrono_tz::America::Chicago);

        // 18:00 CDT is 23:00 UTC
        assert!(
            url.contains("&dates=20240601T230000Z/20240602T010000Z&"),
            "Got: {}",
            url
        );
    }
}
