use anyhow::{Context as _, Result};
use boutique_events_core::{CategoryFilter, WidgetEvent};
use chrono::{Datelike, NaiveDate};

use super::Context;
use crate::render;

pub async fn run(
    ctx: &Context,
    month: Option<String>,
    category: Option<String>,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    let today = ctx.today();
    let first_day = match month {
        Some(m) => parse_month(&m)?,
        None => today.with_day(1).unwrap_or(today),
    };

    let mut adapter = ctx.load_adapter(today).await?;
    adapter.goto_date(first_day);

    if let Some(category) = category {
        // FromStr for CategoryFilter never fails
        let filter: CategoryFilter = category.parse().unwrap_or_default();
        adapter.filter_by_category(filter);
    }
    if let Some(term) = search {
        adapter.search(&term);
    }

    if json {
        let feed: Vec<&WidgetEvent> = adapter.widget().visible().map(|r| &r.event).collect();
        println!("{}", serde_json::to_string_pretty(&feed)?);
    } else {
        print!("{}", render::month(&adapter, today));
    }

    Ok(())
}

/// Parse "YYYY-MM" into the first day of that month.
fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(
            parse_month("2024-06").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("June").is_err());
    }
}
