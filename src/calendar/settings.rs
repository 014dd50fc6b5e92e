//! Calendar grid configuration.

use super::{CalendarError, CalendarResult};
use chrono::{NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

const MINUTES_PER_HOUR: u32 = 60;

/// Visible hours, cell height and week start of the week grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SettingsFields")]
pub struct CalendarSettings {
    start_hour: u32,
    end_hour: u32,
    cell_height: u32,
    week_start: Weekday,
}

#[derive(Deserialize)]
#[serde(default)]
struct SettingsFields {
    start_hour: u32,
    end_hour: u32,
    cell_height: u32,
    week_start: Weekday,
}

impl Default for SettingsFields {
    fn default() -> Self {
        let defaults = CalendarSettings::default();
        Self {
            start_hour: defaults.start_hour,
            end_hour: defaults.end_hour,
            cell_height: defaults.cell_height,
            week_start: defaults.week_start,
        }
    }
}

impl TryFrom<SettingsFields> for CalendarSettings {
    type Error = CalendarError;

    fn try_from(fields: SettingsFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.start_hour,
            fields.end_hour,
            fields.cell_height,
            fields.week_start,
        )
    }
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            start_hour: 6,
            end_hour: 23,
            cell_height: 60,
            week_start: Weekday::Sun,
        }
    }
}

impl CalendarSettings {
    /// Largest accepted pixel height of one hour cell.
    ///
    /// Keeps every offset, up to a full day of minutes times the cell
    /// height, inside `u32`.
    pub const MAX_CELL_HEIGHT: u32 = 10_000;

    /// Creates validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidHourRange`] unless
    /// `start_hour <= end_hour <= 23`, [`CalendarError::ZeroCellHeight`]
    /// for a zero cell height and [`CalendarError::CellHeightTooLarge`] above
    /// [`Self::MAX_CELL_HEIGHT`].
    pub const fn new(
        start_hour: u32,
        end_hour: u32,
        cell_height: u32,
        week_start: Weekday,
    ) -> CalendarResult<Self> {
        if start_hour > end_hour || end_hour > 23 {
            return Err(CalendarError::InvalidHourRange {
                start: start_hour,
                end: end_hour,
            });
        }
        if cell_height == 0 {
            return Err(CalendarError::ZeroCellHeight);
        }
        if cell_height > Self::MAX_CELL_HEIGHT {
            return Err(CalendarError::CellHeightTooLarge {
                height: cell_height,
                max: Self::MAX_CELL_HEIGHT,
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
            cell_height,
            week_start,
        })
    }

    /// Returns the first visible hour.
    #[must_use]
    pub const fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// Returns the last visible hour.
    #[must_use]
    pub const fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Returns the pixel height of one hour cell.
    #[must_use]
    pub const fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Returns the first day of the week.
    #[must_use]
    pub const fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Returns the visible hour rows.
    #[must_use]
    pub const fn time_slots(&self) -> RangeInclusive<u32> {
        self.start_hour..=self.end_hour
    }

    /// Returns `true` when `hour` has a row.
    #[must_use]
    pub const fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.start_hour && hour <= self.end_hour
    }

    /// Returns the top offset of the row for `hour`, if visible.
    #[must_use]
    pub const fn slot_top(&self, hour: u32) -> Option<u32> {
        if !self.contains_hour(hour) {
            return None;
        }
        Some((hour - self.start_hour) * self.cell_height)
    }

    /// Returns the total grid height.
    #[must_use]
    pub const fn grid_height(&self) -> u32 {
        (self.end_hour - self.start_hour + 1) * self.cell_height
    }

    /// Returns the vertical offset of the "now" line, or `None` when `now`
    /// falls outside the visible hours.
    ///
    /// The offset is `minutes since start_hour / 60 * cell_height`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the indicator sits between hour rows, so the offset is fractional"
    )]
    pub fn now_offset(&self, now: NaiveDateTime) -> Option<f64> {
        let hour = now.hour();
        if !self.contains_hour(hour) {
            return None;
        }
        let minutes = (hour - self.start_hour) * MINUTES_PER_HOUR + now.minute();
        Some(f64::from(minutes * self.cell_height) / f64::from(MINUTES_PER_HOUR))
    }
}
