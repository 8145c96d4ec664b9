//! Calendar context and suspension-resolution models.
//!
//! This module contains the [`CalendarContext`] value that every business-day
//! computation receives explicitly, and the [`Resolution`] type describing an
//! administrative order that suspended procedural terms.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An administrative resolution that suspended procedural terms.
///
/// The interval is inclusive on both ends.
///
/// # Example
///
/// ```
/// use deadline_engine::models::Resolution;
/// use chrono::NaiveDate;
///
/// let resolution = Resolution {
///     label: "Resolución No. 48972 del 27 de agosto de 2024".to_string(),
///     start: NaiveDate::from_ymd_opt(2024, 8, 27).unwrap(),
///     end: NaiveDate::from_ymd_opt(2024, 8, 27).unwrap(),
/// };
/// assert!(resolution.overlaps(
///     NaiveDate::from_ymd_opt(2024, 8, 20).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 8, 27).unwrap(),
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// The citation used when the resolution has to be named in a ruling.
    pub label: String,
    /// First suspended day (inclusive).
    pub start: NaiveDate,
    /// Last suspended day (inclusive).
    pub end: NaiveDate,
}

impl Resolution {
    /// Whether `[start, end]` overlaps this resolution.
    ///
    /// Touching a boundary date counts as an overlap.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end && end >= self.start
    }
}

/// The immutable calendar data a computation runs against.
///
/// Built once per case from the reference tables and never mutated
/// afterwards, so it can be shared freely between concurrent computations.
///
/// # Example
///
/// ```
/// use deadline_engine::models::CalendarContext;
/// use chrono::NaiveDate;
///
/// let new_year = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let ctx = CalendarContext::new([new_year], [], vec![]);
///
/// assert!(ctx.is_holiday(new_year));
/// assert!(!ctx.is_closure(new_year));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarContext {
    holidays: HashSet<NaiveDate>,
    closures: HashSet<NaiveDate>,
    resolutions: Vec<Resolution>,
}

impl CalendarContext {
    /// Creates a context from holiday dates, closure dates and resolutions.
    pub fn new(
        holidays: impl IntoIterator<Item = NaiveDate>,
        closures: impl IntoIterator<Item = NaiveDate>,
        resolutions: Vec<Resolution>,
    ) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
            closures: closures.into_iter().collect(),
            resolutions,
        }
    }

    /// Whether the date is a declared holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Whether the court was fully closed on the date.
    pub fn is_closure(&self, date: NaiveDate) -> bool {
        self.closures.contains(&date)
    }

    /// The suspension resolutions, in table order.
    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }
}
