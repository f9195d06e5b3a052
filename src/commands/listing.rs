use anyhow::Result;
use boutique_events_core::listing::{featured_preview, upcoming, NO_UPCOMING_EVENTS};

use super::Context;
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingView {
    Both,
    FeaturedOnly,
    UpcomingOnly,
}

impl ListingView {
    pub fn from_flags(featured_only: bool, upcoming_only: bool) -> Self {
        match (featured_only, upcoming_only) {
            (true, _) => ListingView::FeaturedOnly,
            (false, true) => ListingView::UpcomingOnly,
            (false, false) => ListingView::Both,
        }
    }
}

/// Homepage preview and events grid. Each section does its own load of the
/// events document, as the pages do.
pub async fn run(ctx: &Context, view: ListingView) -> Result<()> {
    if view != ListingView::UpcomingOnly {
        let store = ctx.load_store().await;
        let preview = featured_preview(store.events(), ctx.config.featured_limit);

        println!("Featured events\n");
        if !preview.is_empty() {
            println!("{}", render::cards(preview));
        }
    }

    if view == ListingView::Both {
        println!();
    }

    if view != ListingView::FeaturedOnly {
        let store = ctx.load_store().await;
        let events = upcoming(store.events(), ctx.today());

        println!("Upcoming events\n");
        if events.is_empty() {
            println!("{}", NO_UPCOMING_EVENTS);
        } else {
            println!("{}", render::cards(events));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_from_flags() {
        assert_eq!(ListingView::from_flags(false, false), ListingView::Both);
        assert_eq!(ListingView::from_flags(true, false), ListingView::FeaturedOnly);
        assert_eq!(ListingView::from_flags(false, true), ListingView::UpcomingOnly);
    }
}
