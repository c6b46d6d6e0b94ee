//! Terminal rendering for calendar layouts.
//!
//! Extension traits over farmcal-core layout types, colored with owo_colors.

use farmcal_core::Event;
use farmcal_core::layout::{
    DayLayout, EventMarker, Layout, MonthCell, MonthLayout, WeekLayout, YearLayout,
};
use owo_colors::OwoColorize;

const WEEKDAY_HEADER: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Width of a month-grid cell: two digits, a space and up to six marker chars.
const MONTH_CELL_WIDTH: usize = 9;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        format!("{} {}", self.title, format!("[{}]", self.entry_type).dimmed())
    }
}

impl Render for EventMarker {
    fn render(&self) -> String {
        format!("{} {}", self.title, format!("[{}]", self.entry_type).dimmed())
    }
}

impl Render for Layout<'_> {
    fn render(&self) -> String {
        match self {
            Layout::Day(day) => day.render(),
            Layout::Week(week) => week.render(),
            Layout::Month(month) => month.render(),
            Layout::Year(year) => year.render(),
        }
    }
}

impl Render for DayLayout<'_> {
    fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.slots.len());

        for slot in &self.slots {
            let label = if slot.is_daylight() {
                slot.label.yellow().to_string()
            } else {
                slot.label.dimmed().to_string()
            };

            if slot.events.is_empty() {
                lines.push(format!("  {} │", label));
                continue;
            }

            for (i, event) in slot.events.iter().enumerate() {
                // Only the first line of a slot carries the hour label
                if i == 0 {
                    lines.push(format!("  {} │ {}", label, event.render()));
                } else {
                    lines.push(format!("  {} │ {}", " ".repeat(slot.label.len()), event.render()));
                }
            }
        }

        lines.join("\n")
    }
}

impl Render for WeekLayout<'_> {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        for column in &self.columns {
            let heading = column.date.format("%a %-d").to_string();
            let heading = if column.today {
                heading.bold().reversed().to_string()
            } else {
                heading.bold().to_string()
            };
            lines.push(heading);

            if column.events.is_empty() {
                lines.push(format!("   {}", "No events".dimmed()));
            }
            for event in &column.events {
                lines.push(format!("   {}", event.render()));
            }
        }

        lines.join("\n")
    }
}

/// Dots for each marker plus the overflow label, e.g. `"•••+2"`.
fn marker_summary(markers: usize, overflow: Option<String>) -> String {
    let mut summary = "•".repeat(markers);
    if let Some(more) = overflow {
        summary.push_str(&more);
    }
    summary
}

impl Render for MonthLayout {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        lines.push(
            WEEKDAY_HEADER
                .iter()
                .map(|d| format!("{:<width$}", d, width = MONTH_CELL_WIDTH))
                .collect::<String>()
                .trim_end()
                .dimmed()
                .to_string(),
        );

        for week in self.weeks() {
            let row: String = week
                .iter()
                .map(|cell| match cell {
                    MonthCell::Blank => " ".repeat(MONTH_CELL_WIDTH),
                    MonthCell::Day(day) => {
                        let number = format!("{:>2}", day.day());
                        let number = if day.today {
                            number.bold().reversed().to_string()
                        } else {
                            number
                        };
                        let summary = marker_summary(day.markers.len(), day.overflow_label());
                        // Pad on the plain text so color codes don't skew the grid
                        let padding = (MONTH_CELL_WIDTH - 3).saturating_sub(summary.chars().count());
                        format!("{} {}{}", number, summary.cyan(), " ".repeat(padding))
                    }
                })
                .collect();
            lines.push(row.trim_end().to_string());
        }

        let busy: Vec<_> = self.days().filter(|day| !day.markers.is_empty()).collect();
        if !busy.is_empty() {
            lines.push(String::new());
        }
        for day in busy {
            let markers: Vec<String> = day.markers.iter().map(|m| m.render()).collect();
            let mut line = format!("{:>4}  {}", day.day(), markers.join(", "));
            if let Some(more) = day.overflow_label() {
                line.push_str(&format!(" {}", more.dimmed()));
            }
            lines.push(line);
        }

        lines.join("\n")
    }
}

impl Render for YearLayout {
    fn render(&self) -> String {
        self.months
            .iter()
            .map(|card| {
                let preview: String = card
                    .days
                    .iter()
                    .map(|day| {
                        let mark = if day.has_events { "•" } else { "·" };
                        if day.today {
                            mark.bold().reversed().to_string()
                        } else if day.has_events {
                            mark.cyan().to_string()
                        } else {
                            mark.dimmed().to_string()
                        }
                    })
                    .collect();
                format!("{:<10} {}", card.name, preview)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use farmcal_core::{CalendarViewBuilder, DaylightHours, Granularity, partition_by_date};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    fn builder() -> CalendarViewBuilder {
        CalendarViewBuilder::new(DaylightHours::default()).with_today(d(2024, 3, 12))
    }

    #[test]
    fn test_marker_summary() {
        assert_eq!(marker_summary(0, None), "");
        assert_eq!(marker_summary(3, Some("+2".into())), "•••+2");
    }

    #[test]
    fn test_day_view_lists_every_hour() {
        let events = vec![Event::new("2024-03-15", "Vaccinate", "health")];
        let by_date = partition_by_date(&events);
        let text = builder()
            .build(d(2024, 3, 15), Granularity::Day, &by_date)
            .expect("Should build")
            .render();

        assert_eq!(text.lines().count(), 24);
        let nine = text.lines().nth(9).expect("Should have 09:00");
        assert!(nine.contains("09:00"));
        assert!(nine.contains("Vaccinate"));
    }

    #[test]
    fn test_month_view_shows_overflow() {
        let events: Vec<_> = (0..5)
            .map(|i| Event::new("2024-03-05", format!("job {}", i), "maintenance"))
            .collect();
        let by_date = partition_by_date(&events);
        let text = builder()
            .build(d(2024, 3, 15), Granularity::Month, &by_date)
            .expect("Should build")
            .render();

        assert!(text.contains("•••+2"));
        assert!(text.contains("job 2"));
        assert!(!text.contains("job 3"));
    }

    #[test]
    fn test_year_view_has_twelve_rows() {
        let text = builder()
            .build(d(2024, 3, 15), Granularity::Year, &partition_by_date(&Vec::<Event>::new()))
            .expect("Should build")
            .render();
        assert_eq!(text.lines().count(), 12);
        assert!(text.starts_with("January"));
    }
}
