//! Wall-clock to UTC conversion shared by the iCal export and calendar links.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::event::EventRecord;

/// Duration assumed for events without an end time.
pub const DEFAULT_DURATION_HOURS: i64 = 2;

/// Interpret a local date and time in the store's timezone.
pub fn local_to_utc(date: NaiveDate, time: NaiveTime, tz: Tz) -> DateTime<Utc> {
    let naive = NaiveDateTime::new(date, time);
    match tz.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        // Skipped by a DST transition: move past the gap
        None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| naive.and_utc()),
    }
}

/// Start and end of an event in UTC.
///
/// A missing start time means midnight; a missing end time means start plus
/// [`DEFAULT_DURATION_HOURS`].
pub fn event_span_utc(record: &EventRecord, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = local_to_utc(record.date, record.time.unwrap_or(NaiveTime::MIN), tz);
    let end = match record.end_time {
        Some(end_time) => local_to_utc(record.date, end_time, tz),
        None => start + Duration::hours(DEFAULT_DURATION_HOURS),
    };
    (start, end)
}

/// `YYYYMMDDTHHMMSSZ`
pub fn format_utc_stamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Today's date in the store's timezone.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(time: Option<&str>, end_time: Option<&str>) -> EventRecord {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut record = EventRecord::new("evt", "Event", date);
        record.time = time.map(|t| crate::event::parse_time(t).unwrap());
        record.end_time = end_time.map(|t| crate::event::parse_time(t).unwrap());
        record
    }

    #[test]
    fn test_span_defaults_to_two_hours() {
        let (start, end) = event_span_utc(&record(Some("18:00"), None), Tz::UTC);

        assert_eq!(format_utc_stamp(start), "20240601T180000Z");
        assert_eq!(format_utc_stamp(end), "20240601T200000Z");
        assert_eq!(end - start, Duration::hours(2));
    }

    #[test]
    fn test_span_uses_end_time() {
        let (_, end) = event_span_utc(&record(Some("10:00"), Some("11:30")), Tz::UTC);
        assert_eq!(format_utc_stamp(end), "20240601T113000Z");
    }

    #[test]
    fn test_span_without_time_starts_at_midnight() {
        let (start, end) = event_span_utc(&record(None, None), Tz::UTC);
        assert_eq!(format_utc_stamp(start), "20240601T000000Z");
        assert_eq!(format_utc_stamp(end), "20240601T020000Z");
    }

    #[test]
    fn test_local_time_is_normalized_to_utc() {
        // June in New York is EDT (UTC-4)
        let (start, _) = event_span_utc(&record(Some("18:00"), None), chrono_tz::America::New_York);
        assert_eq!(format_utc_stamp(start), "20240601T220000Z");
    }

    #[test]
    fn test_nonexistent_local_time_moves_past_gap() {
        // 2024-03-10 02:30 does not exist in New York
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let time = NaiveTime::from_hms_opt(2, 30, 0).unwrap();

        let utc = local_to_utc(date, time, chrono_tz::America::New_York);

        assert_eq!(format_utc_stamp(utc), "20240310T073000Z");
    }
}
