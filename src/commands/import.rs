use std::path::Path;

use anyhow::{Context as _, Result};
use boutique_events_core::{CalendarAdapter, MemoryWidget};

use super::manage::OutputArgs;
use super::{write_output, Context};

/// Replace the loaded events with a backup file, then write the result.
///
/// A rejected file leaves the collection as it was and nothing is written.
pub async fn run(ctx: &Context, file: &Path, output: OutputArgs) -> Result<()> {
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    // A failed load means importing into an empty collection
    let mut adapter = CalendarAdapter::with_store(
        ctx.load_store().await,
        MemoryWidget::new(ctx.today()),
        ctx.adapter_options(),
    );

    let count = adapter
        .import_json(&text)
        .with_context(|| format!("Error importing events from {}", file.display()))?;

    eprintln!("Imported {} events", count);

    write_output(&output.resolve(ctx), &adapter.export_json()?)
}
