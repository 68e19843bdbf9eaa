//! Calendar-date arithmetic for booking requests.
//!
//! Dates are plain `NaiveDate` values. No time of day or offset is ever
//! attached, so a request for the 24th is always the 24th.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::errors::{SchedulingError, SchedulingResult};

/// Parses a requested booking date.
///
/// Accepts `YYYY-MM-DD`. A datetime such as `2026-10-24T23:30:00Z` is cut to
/// its date prefix as written.
pub fn parse_calendar_date(raw: &str) -> SchedulingResult<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split_once(['T', ' '])
        .map_or(trimmed, |(date, _)| date);

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| {
        SchedulingError::Validation(format!(
            "Invalid date '{}'. Expected YYYY-MM-DD",
            raw
        ))
    })
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekendAdjustment {
    pub requested: NaiveDate,
    pub date: NaiveDate,
}

impl WeekendAdjustment {
    pub fn was_adjusted(&self) -> bool {
        self.requested != self.date
    }
}

/// Moves Saturday forward two days and Sunday forward one, landing on Monday.
pub fn adjust_for_weekend(date: NaiveDate) -> SchedulingResult<WeekendAdjustment> {
    let days = match date.weekday() {
        Weekday::Sat => 2,
        Weekday::Sun => 1,
        _ => 0,
    };

    Ok(WeekendAdjustment {
        requested: date,
        date: add_days(date, days)?,
    })
}

/// The next bookable weekday strictly after `date`.
pub fn next_candidate_date(date: NaiveDate) -> SchedulingResult<NaiveDate> {
    let next = add_days(date, 1)?;
    Ok(adjust_for_weekend(next)?.date)
}

fn add_days(date: NaiveDate, days: u64) -> SchedulingResult<NaiveDate> {
    date.checked_add_days(Days::new(days)).ok_or_else(|| {
        SchedulingError::Validation(format!("Date {} is out of the supported range", date))
    })
}
