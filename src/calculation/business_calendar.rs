//! Business-day arithmetic over a calendar context.
//!
//! This module provides the calendar primitives the deadline pipeline is
//! built from: day classification, forward business-day scans with a full
//! per-day log, closure-aware calendar-day counting, and detection of
//! suspension resolutions crossed by a period.
//!
//! Two different day notions are used. A *business day* is not a closure,
//! not a weekend and not a holiday. A *counted calendar day* only excludes
//! closures: weekends and holidays count, because the calendar-day count
//! answers how many days the affected party actually lost.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::{CalendarContext, DayClassification, DayLogEntry, Resolution};

/// The outcome of a forward business-day scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessDayScan {
    /// The last scanned date; the Nth business day when N > 0.
    pub end_date: NaiveDate,
    /// Every scanned day with its classification, in scan order.
    pub log: Vec<DayLogEntry>,
}

/// Classifies a date. Closure takes priority over weekend, weekend over holiday.
///
/// # Example
///
/// ```
/// use deadline_engine::calculation::classify_day;
/// use deadline_engine::models::{CalendarContext, DayClassification};
/// use chrono::NaiveDate;
///
/// let ctx = CalendarContext::default();
/// // 2024-06-15 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// assert_eq!(classify_day(saturday, &ctx), DayClassification::Weekend);
/// ```
pub fn classify_day(date: NaiveDate, ctx: &CalendarContext) -> DayClassification {
    if ctx.is_closure(date) {
        DayClassification::Closure
    } else if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        DayClassification::Weekend
    } else if ctx.is_holiday(date) {
        DayClassification::Holiday
    } else {
        DayClassification::Business
    }
}

/// Whether the date is a business day under the context.
pub fn is_business_day(date: NaiveDate, ctx: &CalendarContext) -> bool {
    classify_day(date, ctx).counts()
}

/// Adds `n` business days to `start`.
///
/// The scan begins the day after `start` and stops on the `n`th business
/// day, logging every scanned day. For `n == 0` nothing is scanned and the
/// result is `start` itself.
///
/// # Example
///
/// ```
/// use deadline_engine::calculation::add_business_days;
/// use deadline_engine::models::CalendarContext;
/// use chrono::NaiveDate;
///
/// let ctx = CalendarContext::default();
/// // Friday + 1 business day = Monday
/// let friday = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
/// let scan = add_business_days(friday, 1, &ctx);
/// assert_eq!(scan.end_date, NaiveDate::from_ymd_opt(2024, 6, 17).unwrap());
/// assert_eq!(scan.log.len(), 3);
/// ```
pub fn add_business_days(start: NaiveDate, n: u32, ctx: &CalendarContext) -> BusinessDayScan {
    let mut current = start + Duration::days(1);
    let mut counted = 0;
    let mut log = Vec::new();

    while counted < n {
        let classification = classify_day(current, ctx);
        let business_day_number = if classification.counts() {
            counted += 1;
            Some(counted)
        } else {
            None
        };

        log.push(DayLogEntry {
            date: current,
            classification,
            business_day_number,
        });

        current += Duration::days(1);
    }

    BusinessDayScan {
        end_date: current - Duration::days(1),
        log,
    }
}

/// The earliest business day strictly after `date`.
pub fn next_business_day(date: NaiveDate, ctx: &CalendarContext) -> NaiveDate {
    add_business_days(date, 1, ctx).end_date
}

/// Moves `date` forward until it lands on a business day.
///
/// A date that already is a business day is returned unchanged.
pub fn roll_forward_to_business_day(date: NaiveDate, ctx: &CalendarContext) -> NaiveDate {
    let mut current = date;
    while !is_business_day(current, ctx) {
        current += Duration::days(1);
    }
    current
}

/// Counts the days strictly after `start` through `end`, skipping closures.
///
/// Weekends and holidays are counted. Returns zero when `end <= start`.
///
/// # Example
///
/// ```
/// use deadline_engine::calculation::count_calendar_days_excluding_closures;
/// use deadline_engine::models::CalendarContext;
/// use chrono::NaiveDate;
///
/// let closed = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
/// let ctx = CalendarContext::new([], [closed], vec![]);
///
/// let days = count_calendar_days_excluding_closures(
///     NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 17).unwrap(),
///     &ctx,
/// );
/// assert_eq!(days, 2);
/// ```
pub fn count_calendar_days_excluding_closures(
    start: NaiveDate,
    end: NaiveDate,
    ctx: &CalendarContext,
) -> u32 {
    counted_days_after(start, end, ctx).count() as u32
}

/// The counted (non-closure) days strictly after `start` through `end`.
pub(crate) fn counted_days_after<'a>(
    start: NaiveDate,
    end: NaiveDate,
    ctx: &'a CalendarContext,
) -> impl Iterator<Item = NaiveDate> + 'a {
    start
        .iter_days()
        .skip(1)
        .take_while(move |d| *d <= end)
        .filter(move |d| !ctx.is_closure(*d))
}

/// Advances `days` counted calendar days from `start`, skipping closures.
///
/// This is the forward counterpart of
/// [`count_calendar_days_excluding_closures`]: for the returned date `d`,
/// `count_calendar_days_excluding_closures(start, d, ctx) == days`.
pub fn advance_calendar_days_excluding_closures(
    start: NaiveDate,
    days: u32,
    ctx: &CalendarContext,
) -> NaiveDate {
    let mut current = start;
    let mut counted = 0;
    while counted < days {
        current += Duration::days(1);
        if !ctx.is_closure(current) {
            counted += 1;
        }
    }
    current
}

/// Returns every resolution whose interval overlaps `[start, end]`.
///
/// Overlap is inclusive: a period that only touches a resolution's first or
/// last day crosses it.
pub fn detect_suspension_crossings(
    start: NaiveDate,
    end: NaiveDate,
    resolutions: &[Resolution],
) -> Vec<&Resolution> {
    resolutions
        .iter()
        .filter(|r| r.overlaps(start, end))
        .collect()
}
