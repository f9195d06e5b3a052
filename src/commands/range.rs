use anyhow::Result;

use super::{parse_date_arg, Context};
use crate::render;

pub async fn run(ctx: &Context, from: &str, to: &str) -> Result<()> {
    let start = parse_date_arg(from)?;
    let end = parse_date_arg(to)?;

    if start > end {
        anyhow::bail!("Start date {} is after end date {}", start, end);
    }

    let store = ctx.load_store().await;
    let events = store.events_in_range(start, end);

    if events.is_empty() {
        println!("No events between {} and {}.", start, end);
    } else {
        println!("{}", render::cards(events));
    }

    Ok(())
}
