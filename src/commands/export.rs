use anyhow::Result;
use clap::ValueEnum;

use super::{write_output, Context};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    /// iCalendar file for calendar apps
    Ics,
    /// JSON backup in the events document format
    Json,
}

pub async fn run(ctx: &Context, format: ExportFormat, output: Option<String>) -> Result<()> {
    let adapter = ctx.load_adapter(ctx.today()).await?;

    let (contents, default_name) = match format {
        ExportFormat::Ics => (adapter.export_ics(&ctx.ics_options())?, &ctx.config.ics_filename),
        ExportFormat::Json => (adapter.export_json()?, &ctx.config.backup_filename),
    };

    let output = output.unwrap_or_else(|| default_name.clone());
    write_output(&output, &contents)
}
