//! Mini month navigator grid.

use super::{CalendarError, CalendarResult, layout_week};
use chrono::{Datelike, Months, NaiveDate, Weekday};

/// One cell of the mini month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCell {
    /// Date shown in the cell.
    pub date: NaiveDate,
    /// `false` for leading and trailing days of adjacent months.
    pub in_month: bool,
}

/// A month laid out in whole weeks.
///
/// The grid starts on the week start on or before the first of the month and
/// ends on the last day of the week containing the month's last day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniMonth {
    first_of_month: NaiveDate,
    week_start: Weekday,
    cells: Vec<MonthCell>,
}

impl MiniMonth {
    /// Lays out the month containing `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DateOutOfRange`] near the supported range
    /// limits.
    pub fn new(reference: NaiveDate, week_start: Weekday) -> CalendarResult<Self> {
        let out_of_range = || CalendarError::DateOutOfRange(reference);
        let first_of_month = reference.with_day(1).ok_or_else(out_of_range)?;
        let last_of_month = first_of_month
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(out_of_range)?;
        let grid_start = layout_week(first_of_month, week_start)?.first();
        let grid_end = layout_week(last_of_month, week_start)?.last();
        let cells = grid_start
            .iter_days()
            .take_while(|date| *date <= grid_end)
            .map(|date| MonthCell {
                date,
                in_month: date.year() == first_of_month.year()
                    && date.month() == first_of_month.month(),
            })
            .collect();
        Ok(Self {
            first_of_month,
            week_start,
            cells,
        })
    }

    /// Returns the year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.first_of_month.year()
    }

    /// Returns the month number, 1 to 12.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.first_of_month.month()
    }

    /// Returns the first of the month.
    #[must_use]
    pub const fn first_of_month(&self) -> NaiveDate {
        self.first_of_month
    }

    /// Returns a label such as `March 2024`.
    #[must_use]
    pub fn label(&self) -> String {
        self.first_of_month.format("%B %Y").to_string()
    }

    /// Returns all cells in display order.
    #[must_use]
    pub fn cells(&self) -> &[MonthCell] {
        &self.cells
    }

    /// Iterates rows of seven cells.
    pub fn weeks(&self) -> impl Iterator<Item = &[MonthCell]> {
        self.cells.chunks(7)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn week_count(&self) -> usize {
        self.cells.len().div_euclid(7)
    }

    /// Lays out the following month.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DateOutOfRange`] at the end of the supported
    /// range.
    pub fn next(&self) -> CalendarResult<Self> {
        let next = self
            .first_of_month
            .checked_add_months(Months::new(1))
            .ok_or(CalendarError::DateOutOfRange(self.first_of_month))?;
        Self::new(next, self.week_start)
    }

    /// Lays out the preceding month.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DateOutOfRange`] at the start of the supported
    /// range.
    pub fn previous(&self) -> CalendarResult<Self> {
        let previous = self
            .first_of_month
            .checked_sub_months(Months::new(1))
            .ok_or(CalendarError::DateOutOfRange(self.first_of_month))?;
        Self::new(previous, self.week_start)
    }
}
