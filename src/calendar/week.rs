//! Seven-day week layout anchored on a configurable first weekday.

use super::{CalendarError, CalendarResult};
use chrono::{Datelike, Days, NaiveDate, Weekday};

const DAYS_PER_WEEK: u64 = 7;

/// The seven consecutive days containing a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekLayout {
    reference: NaiveDate,
    week_start: Weekday,
    days: [NaiveDate; 7],
}

/// Days between the most recent `week_start` and `day`, in `0..7`.
fn days_since_week_start(day: Weekday, week_start: Weekday) -> u64 {
    let offset = (7 + day.num_days_from_sunday() - week_start.num_days_from_sunday()).rem_euclid(7);
    u64::from(offset)
}

/// Lays out the week containing `reference`.
///
/// The first day is the latest `week_start` on or before `reference`.
///
/// # Errors
///
/// Returns [`CalendarError::DateOutOfRange`] when the week would cross the
/// supported date range.
pub fn layout_week(reference: NaiveDate, week_start: Weekday) -> CalendarResult<WeekLayout> {
    let offset = days_since_week_start(reference.weekday(), week_start);
    let first = reference
        .checked_sub_days(Days::new(offset))
        .ok_or(CalendarError::DateOutOfRange(reference))?;
    let days: [NaiveDate; 7] = first
        .iter_days()
        .take(7)
        .collect::<Vec<_>>()
        .try_into()
        .map_err(|_| CalendarError::DateOutOfRange(reference))?;
    Ok(WeekLayout {
        reference,
        week_start,
        days,
    })
}

impl WeekLayout {
    /// Returns the date the week was laid out around.
    #[must_use]
    pub const fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Returns the configured first weekday.
    #[must_use]
    pub const fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Returns the seven days in column order.
    #[must_use]
    pub const fn days(&self) -> &[NaiveDate; 7] {
        &self.days
    }

    /// Returns the first column's date.
    #[must_use]
    pub const fn first(&self) -> NaiveDate {
        let [first, ..] = self.days;
        first
    }

    /// Returns the last column's date.
    #[must_use]
    pub const fn last(&self) -> NaiveDate {
        let [.., last] = self.days;
        last
    }

    /// Returns `true` when `date` has a column.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first() <= date && date <= self.last()
    }

    /// Returns the column index of `date`.
    #[must_use]
    pub fn column_of(&self, date: NaiveDate) -> Option<usize> {
        self.days.iter().position(|day| *day == date)
    }

    /// Returns the ISO-8601 week number of the reference date.
    #[must_use]
    pub fn iso_week(&self) -> u32 {
        self.reference.iso_week().week()
    }

    /// Lays out the following week, keeping the weekday of the reference.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DateOutOfRange`] at the end of the supported
    /// range.
    pub fn next(&self) -> CalendarResult<Self> {
        let reference = self
            .reference
            .checked_add_days(Days::new(DAYS_PER_WEEK))
            .ok_or(CalendarError::DateOutOfRange(self.reference))?;
        layout_week(reference, self.week_start)
    }

    /// Lays out the preceding week, keeping the weekday of the reference.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DateOutOfRange`] at the start of the supported
    /// range.
    pub fn previous(&self) -> CalendarResult<Self> {
        let reference = self
            .reference
            .checked_sub_days(Days::new(DAYS_PER_WEEK))
            .ok_or(CalendarError::DateOutOfRange(self.reference))?;
        layout_week(reference, self.week_start)
    }
}
