//! Core library for the boutique events pages.
//!
//! - `event` / `store`: event records and the in-memory collection
//! - `source`: loading the events document from disk or over HTTP
//! - `listing`: homepage preview and upcoming-events grid
//! - `widget` / `adapter`: feeding a calendar widget and handling its callbacks
//! - `ics` / `link`: calendar file export and "add to calendar" links

pub mod adapter;
pub mod error;
pub mod event;
pub mod ics;
pub mod link;
pub mod listing;
pub mod source;
pub mod store;
pub mod time;
pub mod widget;

pub use adapter::{AdapterOptions, CalendarAdapter, CategoryFilter, EventDetail};
pub use error::{EventsError, EventsResult};
pub use event::{EventPatch, EventRecord, EventsDocument};
pub use source::EventSource;
pub use store::EventStore;
pub use widget::{CalendarWidget, MemoryWidget, WidgetCallbacks, WidgetEvent};
