pub mod config;
pub mod range;
pub mod show;

use anyhow::Result;
use chrono::NaiveDate;
use farmcal_core::config::CalendarConfig;
use farmcal_core::{CalendarView, Granularity};

/// Work out the view to show from the flags, falling back to the configured
/// view and today's date, then apply `--prev`/`--next` as individual steps.
pub fn resolve_view(
    config: &CalendarConfig,
    view: Option<Granularity>,
    date: Option<NaiveDate>,
    prev: u32,
    next: u32,
    today: NaiveDate,
) -> Result<CalendarView> {
    let granularity = view.unwrap_or(config.default_view);
    let reference = date.unwrap_or(today);
    let steps = i32::try_from(next)? - i32::try_from(prev)?;

    CalendarView::new(reference, granularity)
        .step(steps)
        .map_err(|e| anyhow::anyhow!(e))
}
