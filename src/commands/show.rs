use anyhow::Result;
use chrono::NaiveDate;
use farmcal_core::config::CalendarConfig;
use farmcal_core::label::DateSpan;
use farmcal_core::{CalendarView, CalendarViewBuilder, Event, EventFilter, Layout, partition_by_date};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, warn};

use crate::render::Render;
use crate::source::EventSource;

#[derive(Serialize)]
struct ShowOutput<'a> {
    label: String,
    view: CalendarView,
    span: DateSpan,
    /// Events left after filtering, whether or not they fall in the span.
    #[serde(skip)]
    kept: usize,
    layout: Layout<'a>,
}

pub async fn run(
    config: &CalendarConfig,
    view: CalendarView,
    source: &EventSource,
    filter: &EventFilter,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let daylight = config.daylight().map_err(|e| anyhow::anyhow!(e))?;
    let builder = CalendarViewBuilder::new(daylight).with_today(today);

    let span = view.span().map_err(|e| anyhow::anyhow!(e))?;
    let events = source.fetch(span, filter).await?;
    let output = build(&builder, view, filter, &events)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", output.label.bold());
    println!();
    if output.kept == 0 {
        println!("{}", "No events found for the selected period.".dimmed());
        return Ok(());
    }
    println!("{}", output.layout.render());

    Ok(())
}

fn build<'a>(
    builder: &CalendarViewBuilder,
    view: CalendarView,
    filter: &EventFilter,
    events: &'a [Event],
) -> Result<ShowOutput<'a>> {
    let span = view.span().map_err(|e| anyhow::anyhow!(e))?;
    let kept = filter.apply(events);

    let mut outside = 0;
    for event in &kept {
        match event.naive_date() {
            Ok(date) if !span.contains(date) => outside += 1,
            Ok(_) => {}
            Err(e) => warn!(title = %event.title, "{}", e),
        }
    }
    debug!(
        fetched = events.len(),
        kept = kept.len(),
        outside,
        "events outside the view are not shown"
    );

    let kept_count = kept.len();
    let by_date = partition_by_date(kept);
    let layout = builder
        .build(view.reference, view.granularity, &by_date)
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(ShowOutput {
        label: view.label().map_err(|e| anyhow::anyhow!(e))?,
        view,
        span,
        kept: kept_count,
        layout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmcal_core::Granularity;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    #[test]
    fn test_week_output_for_reference_date() {
        let events = vec![
            Event::new("2024-03-17", "Vaccinate", "health"),
            Event::new("2024-03-11", "Grease baler", "maintenance"),
            Event::new("not-a-date", "Broken", "health"),
        ];
        let builder = CalendarViewBuilder::default().with_today(d(2024, 3, 12));
        let view = CalendarView::new(d(2024, 3, 15), Granularity::Week);

        let output = build(&builder, view, &EventFilter::default(), &events).expect("Should build");

        assert_eq!(output.span.start, d(2024, 3, 10));
        assert_eq!(output.span.end, d(2024, 3, 16));
        let Layout::Week(week) = &output.layout else {
            panic!("Expected week layout");
        };
        let shown: Vec<_> = week
            .columns
            .iter()
            .flat_map(|c| c.events.iter().map(|e| e.title.as_str()))
            .collect();
        assert_eq!(shown, vec!["Grease baler"]);
    }

    #[test]
    fn test_json_output_shape() {
        let events = vec![Event::new("2024-03-15", "Vaccinate", "health")];
        let builder = CalendarViewBuilder::default().with_today(d(2024, 3, 12));
        let view = CalendarView::new(d(2024, 3, 15), Granularity::Day);

        let output = build(&builder, view, &EventFilter::default(), &events).expect("Should build");
        let value = serde_json::to_value(&output).expect("Should serialize");

        assert_eq!(value["label"], "Friday, March 15, 2024");
        assert_eq!(value["view"]["granularity"], "day");
        assert_eq!(value["layout"]["view"], "day");
        assert_eq!(value["layout"]["slots"][9]["events"][0]["title"], "Vaccinate");
        assert_eq!(value["layout"]["slots"][3]["light"], "nighttime");
    }

    #[test]
    fn test_filter_applies_before_layout() {
        let events = vec![
            Event::new("2024-03-05", "Vaccinate", "health"),
            Event::new("2024-03-05", "Oil change", "maintenance"),
        ];
        let builder = CalendarViewBuilder::default().with_today(d(2024, 3, 12));
        let view = CalendarView::new(d(2024, 3, 15), Granularity::Month);
        let filter = EventFilter {
            entry_type: Some("maintenance".into()),
            category: None,
        };

        let output = build(&builder, view, &filter, &events).expect("Should build");

        let Layout::Month(month) = &output.layout else {
            panic!("Expected month layout");
        };
        let fifth = month.days().find(|day| day.day() == 5).expect("Should have day 5");
        assert_eq!(fifth.markers.len(), 1);
        assert_eq!(fifth.markers[0].title, "Oil change");
    }

    #[test]
    fn test_kept_counts_filtered_events_not_fetched() {
        let events = vec![
            Event::new("2024-03-05", "Vaccinate", "health"),
            Event::new("2024-03-06", "Deworm", "health"),
        ];
        let builder = CalendarViewBuilder::default().with_today(d(2024, 3, 12));
        let view = CalendarView::new(d(2024, 3, 15), Granularity::Month);
        let filter = EventFilter {
            entry_type: Some("maintenance".into()),
            category: None,
        };

        let output = build(&builder, view, &filter, &events).expect("Should build");
        assert_eq!(output.kept, 0);

        let output = build(&builder, view, &EventFilter::default(), &events).expect("Should build");
        assert_eq!(output.kept, 2);
        let value = serde_json::to_value(&output).expect("Should serialize");
        assert!(value.get("kept").is_none());
    }

    #[test]
    fn test_week_at_max_date_is_an_error() {
        let builder = CalendarViewBuilder::default().with_today(d(2024, 3, 12));
        let view = CalendarView::new(NaiveDate::MAX, Granularity::Week);

        let result = build(&builder, view, &EventFilter::default(), &[]);
        assert!(result.is_err());
    }
}
