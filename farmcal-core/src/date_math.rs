//! Calendar arithmetic shared by the layouts, labels and navigation.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{CalendarError, CalendarResult};
use crate::granularity::Granularity;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Most recent Sunday on or before `date`.
pub fn start_of_week(date: NaiveDate) -> CalendarResult<NaiveDate> {
    let offset = date.weekday().num_days_from_sunday();
    date.checked_sub_days(Days::new(u64::from(offset)))
        .ok_or_else(|| out_of_range(date))
}

/// First and last day (Sunday to Saturday) of the week containing `date`.
/// Fails when the week runs past the representable date range.
pub fn week_bounds(date: NaiveDate) -> CalendarResult<(NaiveDate, NaiveDate)> {
    let start = start_of_week(date)?;
    let end = start
        .checked_add_days(Days::new(6))
        .ok_or_else(|| out_of_range(date))?;
    Ok((start, end))
}

/// `count` consecutive dates starting at `start`, stopping early only at the
/// end of the supported date range. Unlike `NaiveDate::iter_days`, the
/// final representable date is included.
pub fn consecutive_days(start: NaiveDate, count: u32) -> impl Iterator<Item = NaiveDate> {
    (0..u64::from(count)).map_while(move |offset| start.checked_add_days(Days::new(offset)))
}

/// First day of `date`'s month.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Last day of `date`'s month.
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first + Days::new(u64::from(days_in_month(date.year(), date.month()) - 1))
}

/// Move `date` by a signed number of calendar months, keeping the
/// day-of-month. When the target month is shorter the surplus days roll
/// into the following month, so Jan 31 + 1 month is Mar 2 (or Mar 3 in a
/// common year).
pub fn add_months_overflowing(date: NaiveDate, months: i32) -> CalendarResult<NaiveDate> {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month0 = index.rem_euclid(12) as u32;

    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .and_then(|first| first.checked_add_days(Days::new(u64::from(date.day0()))))
        .ok_or_else(|| out_of_range(date))
}

/// Move `date` by a signed number of unit steps of `granularity`.
pub fn shift(date: NaiveDate, granularity: Granularity, steps: i32) -> CalendarResult<NaiveDate> {
    match granularity {
        Granularity::Day => add_days(date, i64::from(steps)),
        Granularity::Week => add_days(date, i64::from(steps) * 7),
        Granularity::Month => add_months_overflowing(date, steps),
        Granularity::Year => add_months_overflowing(date, steps.saturating_mul(12)),
    }
}

fn add_days(date: NaiveDate, days: i64) -> CalendarResult<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    };
    shifted.ok_or_else(|| out_of_range(date))
}

fn out_of_range(date: NaiveDate) -> CalendarError {
    CalendarError::InvalidInput(format!("{} is too close to the edge of the supported date range", date))
}
