//! iCal (.ics) export.
//!
//! Produces a calendar file covering the whole event collection according to
//! RFC 5545.

mod generate;

pub use generate::{DEFAULT_PRODID, DEFAULT_UID_DOMAIN, IcsOptions, generate_ics};
