//! Calendar adapter: feeds a widget from its own copy of the events and answers
//! the widget's callbacks.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{debug, error};

use crate::error::EventsResult;
use crate::event::{EventPatch, EventRecord};
use crate::ics::{IcsOptions, generate_ics};
use crate::link::google_calendar_url;
use crate::listing::{format_date, format_time};
use crate::source::EventSource;
use crate::store::EventStore;
use crate::widget::{CalendarWidget, Display, WidgetCallbacks, WidgetEvent, normalize};

pub const TODAY_CLASS: &str = "today-highlight";

/// Message shown in place of the calendar when the events cannot be loaded.
pub const CALENDAR_UNAVAILABLE: &str = "Unable to load calendar";
pub const CALENDAR_UNAVAILABLE_HINT: &str =
    "Please try refreshing the page or contact us if the problem persists.";

#[derive(Debug, Clone)]
pub struct AdapterOptions {
    /// Timezone for calendar links and exports
    pub timezone: Tz,
    /// AND the category filter with the search term instead of letting the most
    /// recent one decide visibility on its own
    pub compose_filters: bool,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        AdapterOptions {
            timezone: Tz::UTC,
            compose_filters: false,
        }
    }
}

/// Category filter selection. `all` shows every event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    fn matches(&self, event: &WidgetEvent) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => {
                event.extended_props.category.as_deref() == Some(category.as_str())
            }
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(s.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

/// Case-insensitive substring match on title and description. Empty terms match everything.
fn matches_search(event: &WidgetEvent, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    event.title.to_lowercase().contains(term) || event.description.to_lowercase().contains(term)
}

/// Everything the detail view shows for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDetail {
    pub id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub calendar_link: String,
}

impl EventDetail {
    pub fn from_record(event: &EventRecord, tz: Tz) -> Self {
        EventDetail {
            id: event.id.clone(),
            title: event.title.clone(),
            date: format_date(event.date),
            time: format_time(event.time, event.end_time),
            location: event.location.clone(),
            description: event.description.clone(),
            calendar_link: google_calendar_url(event, tz),
        }
    }
}

pub struct CalendarAdapter<W: CalendarWidget> {
    store: EventStore,
    widget: W,
    options: AdapterOptions,
    category: CategoryFilter,
    /// Lowercased active search term
    search: String,
}

impl<W: CalendarWidget> CalendarAdapter<W> {
    /// Load the events document and feed the widget.
    ///
    /// This is a load of its own, independent of any other consumer. On failure the
    /// caller shows [`CALENDAR_UNAVAILABLE`] instead of the widget.
    pub async fn initialize(
        source: &EventSource,
        widget: W,
        options: AdapterOptions,
    ) -> EventsResult<Self> {
        let document = match source.fetch_document().await {
            Ok(document) => document,
            Err(err) => {
                error!(source = %source, "Error initializing calendar: {err}");
                return Err(err);
            }
        };

        Ok(Self::with_store(document.into(), widget, options))
    }

    pub fn with_store(store: EventStore, mut widget: W, options: AdapterOptions) -> Self {
        widget.set_events(normalize(store.events()));
        debug!(events = store.len(), "Calendar initialized");

        CalendarAdapter {
            store,
            widget,
            options,
            category: CategoryFilter::All,
            search: String::new(),
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Show events of one category (or all) and hide the rest.
    pub fn filter_by_category(&mut self, filter: CategoryFilter) {
        debug!(%filter, "Filtering calendar");
        self.category = filter;

        if self.options.compose_filters {
            self.apply_visibility();
            return;
        }

        let updates: Vec<_> = self
            .widget
            .rendered()
            .iter()
            .map(|r| (r.event.id.clone(), self.category.matches(&r.event)))
            .collect();
        self.set_visibility(updates);
    }

    /// Show events whose title or description contains the term, ignoring case.
    pub fn search(&mut self, term: &str) {
        debug!(term, "Searching calendar");
        self.search = term.to_lowercase();

        if self.options.compose_filters {
            self.apply_visibility();
            return;
        }

        let updates: Vec<_> = self
            .widget
            .rendered()
            .iter()
            .map(|r| (r.event.id.clone(), matches_search(&r.event, &self.search)))
            .collect();
        self.set_visibility(updates);
    }

    /// Re-evaluate both the category filter and the search term for every event.
    fn apply_visibility(&mut self) {
        let updates: Vec<_> = self
            .widget
            .rendered()
            .iter()
            .map(|r| {
                let visible =
                    self.category.matches(&r.event) && matches_search(&r.event, &self.search);
                (r.event.id.clone(), visible)
            })
            .collect();
        self.set_visibility(updates);
    }

    fn set_visibility(&mut self, updates: Vec<(String, bool)>) {
        for (id, visible) in updates {
            let display = if visible { Display::Auto } else { Display::None };
            self.widget.set_display(&id, display);
        }
    }

    /// Newly rendered events start visible unless filters are composed.
    fn after_widget_change(&mut self) {
        if self.options.compose_filters {
            self.apply_visibility();
        }
    }

    pub fn add_event(&mut self, event: EventRecord) -> EventsResult<()> {
        let widget_event = WidgetEvent::from(&event);
        self.store.add(event)?;
        self.widget.add_event(widget_event);
        self.after_widget_change();
        Ok(())
    }

    pub fn update_event(&mut self, id: &str, patch: EventPatch) -> EventsResult<()> {
        let widget_event = WidgetEvent::from(self.store.update(id, patch)?);
        if self.widget.remove_event(id) {
            self.widget.add_event(widget_event);
        }
        self.after_widget_change();
        Ok(())
    }

    pub fn delete_event(&mut self, id: &str) -> bool {
        let removed = self.store.delete(id);
        self.widget.remove_event(id);
        removed
    }

    /// Replace every event from an import file. Nothing changes when the file is rejected.
    pub fn import_json(&mut self, text: &str) -> EventsResult<usize> {
        let count = self.store.import_json(text)?;
        self.widget.remove_all_events();
        self.widget.set_events(normalize(self.store.events()));
        self.after_widget_change();
        Ok(count)
    }

    pub fn export_json(&self) -> EventsResult<String> {
        self.store.export_json()
    }

    pub fn export_ics(&self, options: &IcsOptions) -> EventsResult<String> {
        generate_ics(self.store.events(), options)
    }

    pub fn goto_date(&mut self, date: NaiveDate) {
        self.widget.goto_date(date);
    }
}

impl<W: CalendarWidget> WidgetCallbacks for CalendarAdapter<W> {
    type Detail = EventDetail;

    fn on_event_click(&self, id: &str) -> Option<EventDetail> {
        self.store
            .get(id)
            .map(|event| EventDetail::from_record(event, self.options.timezone))
    }

    fn on_mouse_enter(&mut self, id: &str) {
        self.widget.set_emphasis(id, true);
    }

    fn on_mouse_leave(&mut self, id: &str) {
        self.widget.set_emphasis(id, false);
    }

    fn day_cell_classes(&self, date: NaiveDate, today: NaiveDate) -> Vec<String> {
        if date == today {
            vec![TODAY_CLASS.to_string()]
        } else {
            Vec::new()
        }
    }

    fn event_classes(&self, id: &str) -> Vec<String> {
        self.store
            .get(id)
            .and_then(EventRecord::category_class)
            .into_iter()
            .collect()
    }
}
