//! Temporal resolver: natural time-bounding phrases to calendar date ranges.
//!
//! Understands `usual` (no bounds, climatological baseline) and the
//! `last <unit>` grammar where the unit is `week`, `month`, `year`, or a
//! month name. Resolved ranges are shifted back [`BASELINE_SHIFT_YEARS`]
//! years so they land inside the historical dataset's coverage window.

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

/// Years subtracted from both ends of every resolved range. The backing
/// dataset stops two years behind the present.
pub const BASELINE_SHIFT_YEARS: i32 = 2;

static LAST_FORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"last\s+(.+)").expect("static regex compiles"));

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// A resolved calendar range. Both bounds `None` means "no explicit bounds,
/// query the climatological baseline" - it is a valid answer, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    pub fn bounded(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeframeError {
    #[error("cannot resolve a timeframe from {0:?}")]
    Unresolved(String),
}

/// Resolve a time-bounding phrase against a fixed `today`.
///
/// Pure: the same phrase and the same `today` always produce the same range.
pub fn resolve(phrase: &str, today: NaiveDate) -> Result<DateRange, TimeframeError> {
    let phrase = phrase.trim().to_lowercase();

    if phrase == "usual" {
        return Ok(DateRange::unbounded());
    }

    let unit = LAST_FORM
        .captures(&phrase)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .ok_or_else(|| TimeframeError::Unresolved(phrase.clone()))?;

    let (start, end) =
        nominal_range(unit, today).ok_or_else(|| TimeframeError::Unresolved(phrase.clone()))?;

    Ok(DateRange::bounded(
        shift_years(start, -BASELINE_SHIFT_YEARS),
        shift_years(end, -BASELINE_SHIFT_YEARS),
    ))
}

/// The range named by `last <unit>` before the baseline shift.
pub(crate) fn nominal_range(unit: &str, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    match unit {
        "week" => {
            // Monday of the previous week; weekday counting matches the
            // connector's Sunday-is-zero convention.
            let back = 7 + i64::from(today.weekday().num_days_from_sunday()) - 1;
            let start = today - Duration::days(back);
            Some((start, start + Duration::days(7)))
        }
        "month" => {
            let (year, month) = previous_month(today);
            Some((NaiveDate::from_ymd_opt(year, month, 1)?, month_end(year, month)?))
        }
        "year" => {
            let year = today.year() - 1;
            Some((
                NaiveDate::from_ymd_opt(year, 1, 1)?,
                NaiveDate::from_ymd_opt(year, 12, 31)?,
            ))
        }
        name => {
            let index = MONTH_NAMES.iter().position(|&n| n == name)?;
            let month = u32::try_from(index).ok()? + 1;
            let year = today.year() - 1;
            Some((NaiveDate::from_ymd_opt(year, month, 1)?, month_end(year, month)?))
        }
    }
}

fn previous_month(today: NaiveDate) -> (i32, u32) {
    if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    }
}

fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).map(|first| first - Duration::days(1))
}

/// Shift a date by whole years, clamping the day when the target month is
/// shorter (Feb 29 minus two years lands on Feb 28).
fn shift_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| month_end(year, date.month()))
        .unwrap_or(date)
}
