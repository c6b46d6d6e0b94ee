//! Human-readable titles and view spans.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::date_math::{first_of_month, last_of_month, week_bounds};
use crate::error::{CalendarError, CalendarResult};
use crate::granularity::Granularity;

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Full English month name for `month` (1-12).
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

/// Inclusive range of dates a view covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Dates covered by the view around `reference`. This is the window the
/// caller should fetch events for.
pub fn view_span(reference: NaiveDate, granularity: Granularity) -> CalendarResult<DateSpan> {
    let span = match granularity {
        Granularity::Day => DateSpan { start: reference, end: reference },
        Granularity::Week => {
            let (start, end) = week_bounds(reference)?;
            DateSpan { start, end }
        }
        Granularity::Month => DateSpan {
            start: first_of_month(reference),
            end: last_of_month(reference),
        },
        Granularity::Year => {
            let jan = reference.with_ordinal(1).unwrap_or(reference);
            let dec = last_of_month(jan.with_month(12).unwrap_or(jan));
            DateSpan { start: jan, end: dec }
        }
    };
    Ok(span)
}

/// Title for the view, e.g. `"March 2024"` for a month.
pub fn display_label(reference: NaiveDate, granularity: Granularity) -> CalendarResult<String> {
    let label = match granularity {
        Granularity::Day => reference.format("%A, %B %-d, %Y").to_string(),
        Granularity::Week => {
            let span = view_span(reference, granularity)?;
            format!(
                "{} \u{2013} {}",
                span.start.format("%b %-d"),
                span.end.format("%b %-d, %Y")
            )
        }
        Granularity::Month => format!("{} {}", month_name(reference.month()), reference.year()),
        Granularity::Year => reference.year().to_string(),
    };
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    fn label(date: NaiveDate, granularity: Granularity) -> String {
        display_label(date, granularity).expect("Should label")
    }

    fn span(date: NaiveDate, granularity: Granularity) -> DateSpan {
        view_span(date, granularity).expect("Should compute span")
    }

    #[test]
    fn test_labels() {
        let date = d(2024, 3, 15);
        assert_eq!(label(date, Granularity::Day), "Friday, March 15, 2024");
        assert_eq!(label(date, Granularity::Week), "Mar 10 \u{2013} Mar 16, 2024");
        assert_eq!(label(date, Granularity::Month), "March 2024");
        assert_eq!(label(date, Granularity::Year), "2024");
    }

    #[test]
    fn test_week_label_across_years() {
        assert_eq!(
            label(d(2025, 1, 1), Granularity::Week),
            "Dec 29 \u{2013} Jan 4, 2025"
        );
    }

    #[test]
    fn test_view_spans() {
        let date = d(2024, 2, 14);
        assert_eq!(span(date, Granularity::Day), DateSpan { start: date, end: date });
        assert_eq!(
            span(date, Granularity::Week),
            DateSpan { start: d(2024, 2, 11), end: d(2024, 2, 17) }
        );
        assert_eq!(
            span(date, Granularity::Month),
            DateSpan { start: d(2024, 2, 1), end: d(2024, 2, 29) }
        );
        let year = span(date, Granularity::Year);
        assert_eq!(year, DateSpan { start: d(2024, 1, 1), end: d(2024, 12, 31) });
        assert_eq!(year.num_days(), 366);
        assert!(year.contains(d(2024, 7, 4)));
        assert!(!year.contains(d(2025, 1, 1)));
    }

    #[test]
    fn test_week_at_max_date_is_invalid_input() {
        let err = view_span(NaiveDate::MAX, Granularity::Week).expect_err("Should fail");
        assert!(matches!(err, CalendarError::InvalidInput(_)));
        let err = display_label(NaiveDate::MAX, Granularity::Week).expect_err("Should fail");
        assert!(matches!(err, CalendarError::InvalidInput(_)));

        // Other granularities stay within the final month and year
        for granularity in [Granularity::Day, Granularity::Month, Granularity::Year] {
            let span = view_span(NaiveDate::MAX, granularity).expect("Should compute span");
            assert_eq!(span.end, NaiveDate::MAX);
        }
    }

    #[test]
    fn test_month_name_out_of_range() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "");
        assert_eq!(month_name(13), "");
    }
}
