//! The calendar view builder: turns a reference date, a granularity and
//! partitioned events into a [`Layout`].
//!
//! The builder is a pure function of its inputs. Navigation state lives in
//! [`crate::CalendarView`], owned by the caller.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::date_math::{consecutive_days, days_in_month, first_of_month, week_bounds};
use crate::error::{CalendarError, CalendarResult};
use crate::granularity::Granularity;
use crate::label::month_name;
use crate::layout::{
    DAY_VIEW_EVENT_HOUR, DayColumn, DayLayout, EventMarker, HourSlot, Layout, Light,
    MAX_MONTH_MARKERS, MonthCard, MonthCell, MonthDay, MonthLayout, PreviewDay, WeekLayout,
    YEAR_PREVIEW_DAYS, YearLayout,
};
use crate::partition::EventsByDate;

pub const DEFAULT_SUNRISE_HOUR: u32 = 6;
pub const DEFAULT_SUNSET_HOUR: u32 = 18;

/// Hours (inclusive, 0-23) shaded as daylight in the day view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaylightHours {
    sunrise: u32,
    sunset: u32,
}

impl Default for DaylightHours {
    fn default() -> Self {
        DaylightHours {
            sunrise: DEFAULT_SUNRISE_HOUR,
            sunset: DEFAULT_SUNSET_HOUR,
        }
    }
}

impl DaylightHours {
    pub fn new(sunrise: u32, sunset: u32) -> CalendarResult<Self> {
        for (name, hour) in [("sunrise", sunrise), ("sunset", sunset)] {
            if hour > 23 {
                return Err(CalendarError::InvalidInput(format!(
                    "{} hour must be between 0 and 23, got {}",
                    name, hour
                )));
            }
        }
        Ok(DaylightHours { sunrise, sunset })
    }

    pub fn sunrise(&self) -> u32 {
        self.sunrise
    }

    pub fn sunset(&self) -> u32 {
        self.sunset
    }

    pub fn is_daylight(&self, hour: u32) -> bool {
        self.sunrise <= hour && hour <= self.sunset
    }
}

/// Builds layouts for a fixed set of daylight hours and a fixed "today".
#[derive(Debug, Clone)]
pub struct CalendarViewBuilder {
    daylight: DaylightHours,
    today: NaiveDate,
}

impl Default for CalendarViewBuilder {
    fn default() -> Self {
        Self::new(DaylightHours::default())
    }
}

impl CalendarViewBuilder {
    /// Builder whose "today" is the local wall-clock date.
    pub fn new(daylight: DaylightHours) -> Self {
        CalendarViewBuilder {
            daylight,
            today: Local::now().date_naive(),
        }
    }

    /// Override the date flagged as today.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn build<'a>(
        &self,
        reference: NaiveDate,
        granularity: Granularity,
        events: &EventsByDate<'a>,
    ) -> CalendarResult<Layout<'a>> {
        debug!(%reference, %granularity, dates = events.len(), "building calendar layout");

        let layout = match granularity {
            Granularity::Day => Layout::Day(self.day(reference, events)),
            Granularity::Week => Layout::Week(self.week(reference, events)?),
            Granularity::Month => Layout::Month(self.month(reference, events)),
            Granularity::Year => Layout::Year(self.year(reference, events)),
        };
        Ok(layout)
    }

    /// 24 hour slots. Every event of the day sits in the 09:00 slot since
    /// events carry no time of day.
    pub fn day<'a>(&self, date: NaiveDate, events: &EventsByDate<'a>) -> DayLayout<'a> {
        let day_events = events.on(date);

        let slots = (0..24)
            .map(|hour| HourSlot {
                hour,
                label: format!("{:02}:00", hour),
                light: if self.daylight.is_daylight(hour) {
                    Light::Daylight
                } else {
                    Light::Nighttime
                },
                events: if hour == DAY_VIEW_EVENT_HOUR {
                    day_events.to_vec()
                } else {
                    Vec::new()
                },
            })
            .collect();

        DayLayout { date, slots }
    }

    /// Seven columns from the Sunday on or before `reference`. Weeks that
    /// would run past the supported date range are `InvalidInput`.
    pub fn week<'a>(
        &self,
        reference: NaiveDate,
        events: &EventsByDate<'a>,
    ) -> CalendarResult<WeekLayout<'a>> {
        let (start, _) = week_bounds(reference)?;

        let columns = consecutive_days(start, 7)
            .map(|date| DayColumn {
                date,
                today: date == self.today,
                events: events.on(date).to_vec(),
            })
            .collect();

        Ok(WeekLayout { start, columns })
    }

    pub fn month(&self, reference: NaiveDate, events: &EventsByDate<'_>) -> MonthLayout {
        let first = first_of_month(reference);
        let first_weekday = first.weekday().num_days_from_sunday();
        let days = days_in_month(first.year(), first.month());

        let mut cells: Vec<MonthCell> = Vec::with_capacity((first_weekday + days) as usize);
        cells.extend((0..first_weekday).map(|_| MonthCell::Blank));

        for date in consecutive_days(first, days) {
            let day_events = events.on(date);
            cells.push(MonthCell::Day(MonthDay {
                date,
                markers: day_events
                    .iter()
                    .take(MAX_MONTH_MARKERS)
                    .map(|event| EventMarker::from(*event))
                    .collect(),
                overflow: day_events.len().saturating_sub(MAX_MONTH_MARKERS),
                today: date == self.today,
            }));
        }

        MonthLayout {
            year: first.year(),
            month: first.month(),
            first_weekday,
            cells,
        }
    }

    /// Twelve month cards, each previewing at most the first 35 days.
    pub fn year(&self, reference: NaiveDate, events: &EventsByDate<'_>) -> YearLayout {
        let year = reference.year();

        let months = (1..=12)
            .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
            .map(|first| {
                let preview = days_in_month(year, first.month()).min(YEAR_PREVIEW_DAYS);
                MonthCard {
                    month: first.month(),
                    name: month_name(first.month()).to_string(),
                    first_weekday: first.weekday().num_days_from_sunday(),
                    days: consecutive_days(first, preview)
                        .map(|date| PreviewDay {
                            date,
                            has_events: events.has_events(date),
                            today: date == self.today,
                        })
                        .collect(),
                }
            })
            .collect();

        YearLayout { year, months }
    }
}
