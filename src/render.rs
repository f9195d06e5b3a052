//! Plain-text views for the terminal.

use boutique_events_core::adapter::TODAY_CLASS;
use boutique_events_core::listing::{format_time, EventCard};
use boutique_events_core::{
    CalendarAdapter, EventDetail, EventRecord, MemoryWidget, WidgetCallbacks,
};
use chrono::{Datelike, NaiveDate};

/// One card: date badge, title, time, description.
pub fn card(card: &EventCard) -> String {
    let mut out = format!("{:>3} {}  {}\n", card.day, card.month, card.title);
    out.push_str(&format!("        {}\n", card.time));
    if !card.description.is_empty() {
        out.push_str(&format!("        {}\n", card.description));
    }
    out
}

pub fn cards<'a>(events: impl IntoIterator<Item = &'a EventRecord>) -> String {
    events
        .into_iter()
        .map(|e| card(&EventCard::from_record(e)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Detail view shown when an event is clicked.
pub fn detail(detail: &EventDetail) -> String {
    let mut out = format!("{}\n", detail.title);
    out.push_str(&format!("  Date:     {}\n", detail.date));
    out.push_str(&format!("  Time:     {}\n", detail.time));
    if !detail.location.is_empty() {
        out.push_str(&format!("  Location: {}\n", detail.location));
    }
    if !detail.description.is_empty() {
        out.push_str(&format!("\n  {}\n", detail.description));
    }
    out.push_str(&format!("\nAdd to Google Calendar:\n  {}\n", detail.calendar_link));
    out
}

/// Visible events of the widget's current month, grouped by day.
///
/// Days carrying the today class are marked with `*`, and each event shows
/// its category class in brackets.
pub fn month(adapter: &CalendarAdapter<MemoryWidget>, today: NaiveDate) -> String {
    let current = adapter.widget().current_date();
    let mut out = format!("{}\n", current.format("%B %Y"));

    let mut events: Vec<&EventRecord> = adapter
        .widget()
        .visible()
        .filter_map(|rendered| adapter.store().get(&rendered.event.id))
        .filter(|e| e.date.year() == current.year() && e.date.month() == current.month())
        .collect();
    events.sort_by_key(|e| e.date);

    if events.is_empty() {
        out.push_str("  No events this month.\n");
        return out;
    }

    let mut last_day = None;
    for event in events {
        if last_day != Some(event.date) {
            let is_today = adapter
                .day_cell_classes(event.date, today)
                .iter()
                .any(|c| c == TODAY_CLASS);
            let marker = if is_today { "*" } else { " " };
            out.push_str(&format!("{} {}\n", marker, event.date.format("%a %-d")));
            last_day = Some(event.date);
        }

        let classes = adapter.event_classes(&event.id);
        let tag = if classes.is_empty() {
            String::new()
        } else {
            format!(" [{}]", classes.join(" "))
        };
        out.push_str(&format!(
            "    {}  {}{}\n",
            format_time(event.time, event.end_time),
            event.title,
            tag
        ));
    }

    out
}
