use anyhow::Result;
use boutique_events_core::link::google_calendar_url;
use boutique_events_core::WidgetCallbacks;

use super::Context;
use crate::render;

/// Detail view for one event, as shown when it is clicked in the calendar.
pub async fn run(ctx: &Context, id: &str, open: bool) -> Result<()> {
    let adapter = ctx.load_adapter(ctx.today()).await?;

    let Some(detail) = adapter.on_event_click(id) else {
        anyhow::bail!("Event '{}' not found", id);
    };

    print!("{}", render::detail(&detail));

    if open {
        open_link(&detail.calendar_link);
    }

    Ok(())
}

pub async fn link(ctx: &Context, id: &str, open: bool) -> Result<()> {
    let store = ctx.load_store().await;

    let Some(event) = store.get(id) else {
        anyhow::bail!("Event '{}' not found", id);
    };

    let url = google_calendar_url(event, ctx.tz);

    if open {
        open_link(&url);
    } else {
        println!("{}", url);
    }

    Ok(())
}

fn open_link(url: &str) {
    if open::that(url).is_err() {
        println!("(Could not open browser automatically, please copy the URL above)");
        println!("{}", url);
    }
}
