pub mod calendar;
pub mod config;
pub mod export;
pub mod import;
pub mod listing;
pub mod manage;
pub mod range;
pub mod show;

use std::path::Path;

use anyhow::{Context as _, Result};
use boutique_events_core::adapter::{CALENDAR_UNAVAILABLE, CALENDAR_UNAVAILABLE_HINT};
use boutique_events_core::ics::IcsOptions;
use boutique_events_core::{AdapterOptions, CalendarAdapter, EventSource, EventStore, MemoryWidget};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

use crate::config::{load_config, Config};

/// Settings in effect for one invocation: config file plus command line overrides.
pub struct Context {
    pub config: Config,
    pub config_path: Option<std::path::PathBuf>,
    pub source: EventSource,
    pub tz: Tz,
}

impl Context {
    pub fn load(
        config_path: Option<&Path>,
        source: Option<String>,
        tz: Option<String>,
    ) -> Result<Self> {
        let mut cfg = load_config(config_path)?;

        if let Some(source) = source {
            cfg.source = source;
        }
        if let Some(tz) = tz {
            cfg.timezone = tz;
        }

        let tz = cfg.tz()?;
        let source = EventSource::parse(&cfg.source)?;

        Ok(Self {
            config: cfg,
            config_path: config_path.map(Path::to_path_buf),
            source,
            tz,
        })
    }

    pub fn today(&self) -> NaiveDate {
        boutique_events_core::time::today_in(self.tz)
    }

    pub fn adapter_options(&self) -> AdapterOptions {
        AdapterOptions {
            timezone: self.tz,
            compose_filters: self.config.compose_filters,
        }
    }

    pub fn ics_options(&self) -> IcsOptions {
        IcsOptions {
            prodid: self.config.prodid.clone(),
            uid_domain: self.config.uid_domain.clone(),
            timezone: self.tz,
            dtstamp: Utc::now(),
        }
    }

    /// Load the events for read-only views. A failed load shows as no events.
    pub async fn load_store(&self) -> EventStore {
        self.source.load_store().await
    }

    /// Load the events into a calendar adapter. A failed load is an error here,
    /// so nothing gets written from an empty collection by accident.
    pub async fn load_adapter(
        &self,
        initial_date: NaiveDate,
    ) -> Result<CalendarAdapter<MemoryWidget>> {
        CalendarAdapter::initialize(
            &self.source,
            MemoryWidget::new(initial_date),
            self.adapter_options(),
        )
        .await
        .map_err(|err| {
            anyhow::anyhow!(
                "{}: {}\n{}",
                CALENDAR_UNAVAILABLE,
                err,
                CALENDAR_UNAVAILABLE_HINT
            )
        })
    }
}

/// Write to a file, or to stdout when the output is "-".
pub fn write_output(output: &str, contents: &str) -> Result<()> {
    if output == "-" {
        print!("{}", contents);
        return Ok(());
    }

    std::fs::write(output, contents).with_context(|| format!("Failed to write {}", output))?;
    println!("Wrote {}", output);
    Ok(())
}

/// Parse a "YYYY-MM-DD" date argument.
pub fn parse_date_arg(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(
            parse_date_arg(" 2024-06-01 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert!(parse_date_arg("06/01/2024").is_err());
    }

    #[test]
    fn test_context_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let contents = "source = \"events.json\"\ntimezone = \"America/Chicago\"\n";
        std::fs::write(&path, contents).unwrap();

        let ctx = Context::load(
            Some(&path),
            Some("https://example.com/data/events.json".to_string()),
            Some("Europe/London".to_string()),
        )
        .unwrap();

        assert!(matches!(ctx.source, EventSource::Url(_)));
        assert_eq!(ctx.tz, chrono_tz::Europe::London);
        assert_eq!(ctx.adapter_options().timezone, chrono_tz::Europe::London);
    }

    #[test]
    fn test_context_rejects_bad_tz_override() {
        let dir = tempfile::tempdir().unwrap();
        let result = Context::load(
            Some(&dir.path().join("config.toml")),
            None,
            Some("Nowhere/Special".to_string()),
        );
        assert!(result.is_err());
    }
}
