//! Week and mini-month navigation state.

use super::{
    CalendarError, CalendarResult, CalendarSettings, MiniMonth, WeekLayout, layout_week,
};
use chrono::{Datelike, Days, Months, NaiveDate};
use mockable::Clock;

const DAYS_PER_WEEK: u64 = 7;

/// Tracks the displayed week and the independently browsed mini month.
///
/// Browsing the mini month does not move the week; selecting a day does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarNavigator {
    settings: CalendarSettings,
    current: NaiveDate,
    mini_anchor: NaiveDate,
}

impl CalendarNavigator {
    /// Starts on `current` with the mini month showing the same month.
    #[must_use]
    pub const fn new(settings: CalendarSettings, current: NaiveDate) -> Self {
        Self {
            settings,
            current,
            mini_anchor: current,
        }
    }

    /// Starts on today's local date.
    #[must_use]
    pub fn starting_today(settings: CalendarSettings, clock: &impl Clock) -> Self {
        Self::new(settings, clock.local().date_naive())
    }

    /// Returns the settings.
    #[must_use]
    pub const fn settings(&self) -> &CalendarSettings {
        &self.settings
    }

    /// Returns the reference date of the displayed week.
    #[must_use]
    pub const fn current(&self) -> NaiveDate {
        self.current
    }

    /// Lays out the displayed week.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DateOutOfRange`] near the supported range
    /// limits.
    pub fn week(&self) -> CalendarResult<WeekLayout> {
        layout_week(self.current, self.settings.week_start())
    }

    /// Lays out the browsed mini month.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DateOutOfRange`] near the supported range
    /// limits.
    pub fn mini_month(&self) -> CalendarResult<MiniMonth> {
        MiniMonth::new(self.mini_anchor, self.settings.week_start())
    }

    /// Moves the displayed week forward by seven days.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DateOutOfRange`] at the end of the supported
    /// range; the position is unchanged.
    pub fn next_week(&mut self) -> CalendarResult<()> {
        self.current = self
            .current
            .checked_add_days(Days::new(DAYS_PER_WEEK))
            .ok_or(CalendarError::DateOutOfRange(self.current))?;
        Ok(())
    }

    /// Moves the displayed week back by seven days.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DateOutOfRange`] at the start of the supported
    /// range; the position is unchanged.
    pub fn previous_week(&mut self) -> CalendarResult<()> {
        self.current = self
            .current
            .checked_sub_days(Days::new(DAYS_PER_WEEK))
            .ok_or(CalendarError::DateOutOfRange(self.current))?;
        Ok(())
    }

    /// Jumps the week and the mini month back to today.
    pub fn go_to_today(&mut self, clock: &impl Clock) {
        let today = clock.local().date_naive();
        self.current = today;
        self.mini_anchor = today;
    }

    /// Shows the week containing `day`, as when a mini-month cell is clicked.
    pub const fn select_day(&mut self, day: NaiveDate) {
        self.current = day;
    }

    /// Browses the mini month forward.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DateOutOfRange`] at the end of the supported
    /// range.
    pub fn next_month(&mut self) -> CalendarResult<()> {
        self.mini_anchor = self
            .mini_anchor
            .checked_add_months(Months::new(1))
            .ok_or(CalendarError::DateOutOfRange(self.mini_anchor))?;
        Ok(())
    }

    /// Browses the mini month back.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DateOutOfRange`] at the start of the supported
    /// range.
    pub fn previous_month(&mut self) -> CalendarResult<()> {
        self.mini_anchor = self
            .mini_anchor
            .checked_sub_months(Months::new(1))
            .ok_or(CalendarError::DateOutOfRange(self.mini_anchor))?;
        Ok(())
    }

    /// Header text for the displayed week, e.g. `March 2024 · Week 10`.
    #[must_use]
    pub fn header(&self) -> String {
        format!(
            "{} · Week {}",
            self.current.format("%B %Y"),
            self.current.iso_week().week()
        )
    }
}
