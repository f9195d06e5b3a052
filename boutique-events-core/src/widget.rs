//! Boundary to the calendar widget.
//!
//! The widget itself is external. [`CalendarWidget`] is the "supply data" side
//! (what we call on the widget) and [`WidgetCallbacks`] the "receive events" side
//! (what the widget calls back). [`MemoryWidget`] is an in-process widget used by
//! the command line front end and tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event::{EventRecord, format_time_hhmm};

/// Event in the shape the calendar widget consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetEvent {
    pub id: String,
    pub title: String,
    /// `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM`
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    pub all_day: bool,
    pub description: String,
    pub extended_props: ExtendedProps,
}

/// Fields carried through for styling and lookup; the adapter does not interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedProps {
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub featured: bool,
}

impl From<&EventRecord> for WidgetEvent {
    fn from(event: &EventRecord) -> Self {
        let date = event.date.format("%Y-%m-%d").to_string();

        let start = match event.time {
            Some(time) => format!("{}T{}", date, format_time_hhmm(time)),
            None => date.clone(),
        };
        // All-day events carry no end, even when the record has an end time
        let end = match (event.time, event.end_time) {
            (Some(_), Some(end_time)) => Some(format!("{}T{}", date, format_time_hhmm(end_time))),
            _ => None,
        };

        WidgetEvent {
            id: event.id.clone(),
            title: event.title.clone(),
            start,
            end,
            all_day: event.time.is_none(),
            description: event.description.clone(),
            extended_props: ExtendedProps {
                location: event.location.clone(),
                category: event.category.clone(),
                featured: event.featured,
            },
        }
    }
}

/// Reshape records into widget events, one for one, in order.
pub fn normalize(events: &[EventRecord]) -> Vec<WidgetEvent> {
    events.iter().map(WidgetEvent::from).collect()
}

/// Visibility of a rendered event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Auto,
    None,
}

/// A widget event as currently rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEvent {
    pub event: WidgetEvent,
    pub display: Display,
    /// Hover emphasis; presentation only
    pub emphasized: bool,
}

impl RenderedEvent {
    pub fn is_visible(&self) -> bool {
        self.display == Display::Auto
    }
}

/// Calls made into the calendar widget.
pub trait CalendarWidget {
    /// Replace every event with a fresh source.
    fn set_events(&mut self, events: Vec<WidgetEvent>);
    fn add_event(&mut self, event: WidgetEvent);
    /// Returns whether an event with that id was rendered.
    fn remove_event(&mut self, id: &str) -> bool;
    fn remove_all_events(&mut self);
    fn set_display(&mut self, id: &str, display: Display);
    fn set_emphasis(&mut self, id: &str, emphasized: bool);
    fn rendered(&self) -> &[RenderedEvent];
    fn goto_date(&mut self, date: NaiveDate);
}

/// Calls the widget makes back into the adapter.
pub trait WidgetCallbacks {
    type Detail;

    fn on_event_click(&self, id: &str) -> Option<Self::Detail>;
    fn on_mouse_enter(&mut self, id: &str);
    fn on_mouse_leave(&mut self, id: &str);
    fn day_cell_classes(&self, date: NaiveDate, today: NaiveDate) -> Vec<String>;
    fn event_classes(&self, id: &str) -> Vec<String>;
}

/// In-process calendar widget that keeps rendered events in insertion order.
#[derive(Debug, Clone)]
pub struct MemoryWidget {
    events: Vec<RenderedEvent>,
    current_date: NaiveDate,
}

impl MemoryWidget {
    pub fn new(initial_date: NaiveDate) -> Self {
        MemoryWidget {
            events: Vec::new(),
            current_date: initial_date,
        }
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    /// Rendered events that are currently shown.
    pub fn visible(&self) -> impl Iterator<Item = &RenderedEvent> {
        self.events.iter().filter(|e| e.is_visible())
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut RenderedEvent> {
        self.events.iter_mut().find(|e| e.event.id == id)
    }
}

impl CalendarWidget for MemoryWidget {
    fn set_events(&mut self, events: Vec<WidgetEvent>) {
        self.events = events
            .into_iter()
            .map(|event| RenderedEvent {
                event,
                display: Display::Auto,
                emphasized: false,
            })
            .collect();
    }

    fn add_event(&mut self, event: WidgetEvent) {
        self.events.push(RenderedEvent {
            event,
            display: Display::Auto,
            emphasized: false,
        });
    }

    fn remove_event(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.event.id != id);
        self.events.len() != before
    }

    fn remove_all_events(&mut self) {
        self.events.clear();
    }

    fn set_display(&mut self, id: &str, display: Display) {
        if let Some(rendered) = self.find_mut(id) {
            rendered.display = display;
        }
    }

    fn set_emphasis(&mut self, id: &str, emphasized: bool) {
        if let Some(rendered) = self.find_mut(id) {
            rendered.emphasized = emphasized;
        }
    }

    fn rendered(&self) -> &[RenderedEvent] {
        &self.events
    }

    fn goto_date(&mut self, date: NaiveDate) {
        self.current_date = date;
    }
}
