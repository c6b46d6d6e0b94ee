//! Layout descriptions produced by the builder, one shape per granularity.
//!
//! Layouts borrow events from the caller's list and carry no presentation
//! details beyond what a renderer needs to draw the grid.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::event::Event;

/// Maximum number of event markers drawn in a month cell.
pub const MAX_MONTH_MARKERS: usize = 3;

/// Number of days previewed on a year-view month card.
pub const YEAR_PREVIEW_DAYS: u32 = 35;

/// Hour slot that receives all of a day's events in the day view.
pub const DAY_VIEW_EVENT_HOUR: u32 = 9;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Layout<'a> {
    Day(DayLayout<'a>),
    Week(WeekLayout<'a>),
    Month(MonthLayout),
    Year(YearLayout),
}

// Day view

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Light {
    Daylight,
    Nighttime,
}

#[derive(Debug, Clone, Serialize)]
pub struct HourSlot<'a> {
    pub hour: u32,
    /// `"HH:00"`
    pub label: String,
    pub light: Light,
    pub events: Vec<&'a Event>,
}

impl HourSlot<'_> {
    pub fn is_daylight(&self) -> bool {
        self.light == Light::Daylight
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DayLayout<'a> {
    pub date: NaiveDate,
    pub slots: Vec<HourSlot<'a>>,
}

// Week view

#[derive(Debug, Clone, Serialize)]
pub struct DayColumn<'a> {
    pub date: NaiveDate,
    pub today: bool,
    pub events: Vec<&'a Event>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekLayout<'a> {
    /// Sunday the week starts on.
    pub start: NaiveDate,
    pub columns: Vec<DayColumn<'a>>,
}

impl WeekLayout<'_> {
    pub fn end(&self) -> NaiveDate {
        self.columns.last().map(|c| c.date).unwrap_or(self.start)
    }
}

// Month view

/// Compact marker for one event in a month cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventMarker {
    pub entry_type: String,
    pub title: String,
}

impl From<&Event> for EventMarker {
    fn from(event: &Event) -> Self {
        EventMarker {
            entry_type: event.entry_type.clone(),
            title: event.title.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthDay {
    pub date: NaiveDate,
    pub markers: Vec<EventMarker>,
    /// Events beyond the first [`MAX_MONTH_MARKERS`], 0 if none.
    pub overflow: usize,
    pub today: bool,
}

impl MonthDay {
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// `"+N"` when the day has more events than markers.
    pub fn overflow_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{}", self.overflow))
    }

    pub fn total_events(&self) -> usize {
        self.markers.len() + self.overflow
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MonthCell {
    Blank,
    Day(MonthDay),
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    /// Weekday of the 1st, Sunday = 0. Also the number of leading blanks.
    pub first_weekday: u32,
    /// Leading blanks followed by one cell per day of the month.
    pub cells: Vec<MonthCell>,
}

impl MonthLayout {
    pub fn days(&self) -> impl Iterator<Item = &MonthDay> {
        self.cells.iter().filter_map(|cell| match cell {
            MonthCell::Day(day) => Some(day),
            MonthCell::Blank => None,
        })
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|cell| matches!(cell, MonthCell::Blank))
            .count()
    }

    /// Cells chunked into rows of seven, Sunday first. The last row may be
    /// shorter.
    pub fn weeks(&self) -> impl Iterator<Item = &[MonthCell]> {
        self.cells.chunks(7)
    }
}

// Year view

#[derive(Debug, Clone, Serialize)]
pub struct PreviewDay {
    pub date: NaiveDate,
    pub has_events: bool,
    pub today: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthCard {
    pub month: u32,
    pub name: String,
    pub first_weekday: u32,
    pub days: Vec<PreviewDay>,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearLayout {
    pub year: i32,
    pub months: Vec<MonthCard>,
}
