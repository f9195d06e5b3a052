use anyhow::{Context as _, Result};
use boutique_events_core::event::parse_time;
use boutique_events_core::{EventPatch, EventRecord};
use chrono::NaiveTime;
use clap::Args;

use super::{parse_date_arg, write_output, Context};

/// Where the resulting backup goes. The events document itself is never written.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output file ("-" for stdout), defaults to the configured backup file name
    #[arg(short, long)]
    pub output: Option<String>,
}

impl OutputArgs {
    pub fn resolve(&self, ctx: &Context) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| ctx.config.backup_filename.clone())
    }
}

/// Optional event fields shared by `add` and `update`.
#[derive(Args, Debug, Clone, Default)]
pub struct EventFields {
    /// Start time (e.g., "18:00")
    #[arg(long)]
    pub time: Option<String>,

    /// End time (e.g., "20:00")
    #[arg(long)]
    pub end_time: Option<String>,

    /// Event description
    #[arg(long)]
    pub description: Option<String>,

    /// Event location
    #[arg(short, long)]
    pub location: Option<String>,

    /// Make it an all-day event, dropping the start and end times
    #[arg(long, conflicts_with_all = ["time", "end_time"])]
    pub all_day: bool,

    /// Category (e.g., "trunk-show", "workshop")
    #[arg(short, long, conflicts_with = "clear_category")]
    pub category: Option<String>,

    /// Remove the event's category
    #[arg(long)]
    pub clear_category: bool,

    /// Show the event in the homepage preview
    #[arg(long, conflicts_with = "unfeature")]
    pub featured: bool,

    /// Remove the event from the homepage preview
    #[arg(long)]
    pub unfeature: bool,
}

impl EventFields {
    fn into_patch(self) -> Result<EventPatch> {
        Ok(EventPatch {
            time: clearable_time(self.time.as_deref(), self.all_day)?,
            end_time: clearable_time(self.end_time.as_deref(), self.all_day)?,
            description: self.description,
            location: self.location,
            category: match (self.category, self.clear_category) {
                (Some(category), _) => Some(Some(category)),
                (None, true) => Some(None),
                (None, false) => None,
            },
            featured: match (self.featured, self.unfeature) {
                (true, _) => Some(true),
                (false, true) => Some(false),
                (false, false) => None,
            },
            ..EventPatch::default()
        })
    }
}

/// `Some(None)` clears the time, `None` leaves it alone.
fn clearable_time(value: Option<&str>, clear: bool) -> Result<Option<Option<NaiveTime>>> {
    match value {
        Some(s) => Ok(Some(Some(parse_time_arg(s)?))),
        None if clear => Ok(Some(None)),
        None => Ok(None),
    }
}

fn parse_time_arg(s: &str) -> Result<NaiveTime> {
    parse_time(s).with_context(|| format!("Invalid time '{}', expected HH:MM", s))
}

/// Build a new record from command line arguments.
fn new_record(
    title: String,
    date: &str,
    id: Option<String>,
    fields: EventFields,
) -> Result<EventRecord> {
    let date = parse_date_arg(date)?;
    let id = id.unwrap_or_else(|| format!("evt-{}", uuid::Uuid::new_v4()));

    let mut record = EventRecord::new(id, title, date);
    record.apply(fields.into_patch()?);
    Ok(record)
}

pub async fn add(
    ctx: &Context,
    title: String,
    date: String,
    id: Option<String>,
    fields: EventFields,
    output: OutputArgs,
) -> Result<()> {
    let record = new_record(title, &date, id, fields)?;
    let id = record.id.clone();

    let mut adapter = ctx.load_adapter(ctx.today()).await?;
    adapter
        .add_event(record)
        .with_context(|| format!("Could not add event '{}'", id))?;

    eprintln!("Added event {}", id);
    write_output(&output.resolve(ctx), &adapter.export_json()?)
}

pub async fn update(
    ctx: &Context,
    id: &str,
    title: Option<String>,
    date: Option<String>,
    fields: EventFields,
    output: OutputArgs,
) -> Result<()> {
    let mut patch = fields.into_patch()?;
    patch.title = title;
    patch.date = date.as_deref().map(parse_date_arg).transpose()?;

    if patch.is_empty() {
        anyhow::bail!("Nothing to update. Pass at least one field to change.");
    }

    let mut adapter = ctx.load_adapter(ctx.today()).await?;
    adapter
        .update_event(id, patch)
        .with_context(|| format!("Could not update event '{}'", id))?;

    eprintln!("Updated event {}", id);
    write_output(&output.resolve(ctx), &adapter.export_json()?)
}

pub async fn delete(ctx: &Context, id: &str, output: OutputArgs) -> Result<()> {
    let mut adapter = ctx.load_adapter(ctx.today()).await?;

    if !adapter.delete_event(id) {
        anyhow::bail!("Event '{}' not found", id);
    }

    eprintln!("Deleted event {}", id);
    write_output(&output.resolve(ctx), &adapter.export_json()?)
}
