//! Prefilled schedule for a clicked grid slot.

use super::{CalendarError, CalendarResult};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use std::fmt;
use std::str::FromStr;

/// Format of a slot prefill: local time without seconds or zone.
pub const PREFILL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Local start time for a request created from an empty grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotPrefill(NaiveDateTime);

/// Returns the prefill for the cell at `day` and `hour`, minute zero.
///
/// # Errors
///
/// Returns [`CalendarError::HourOutOfRange`] when `hour` exceeds 23.
pub fn slot_click(day: NaiveDate, hour: u32) -> CalendarResult<SlotPrefill> {
    day.and_hms_opt(hour, 0, 0)
        .map(SlotPrefill)
        .ok_or(CalendarError::HourOutOfRange(hour))
}

impl SlotPrefill {
    /// Parses a `YYYY-MM-DDTHH:mm` string.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidPrefill`] for any other shape.
    pub fn parse(value: &str) -> CalendarResult<Self> {
        NaiveDateTime::parse_from_str(value.trim(), PREFILL_FORMAT)
            .map(Self)
            .map_err(|_| CalendarError::InvalidPrefill(value.to_owned()))
    }

    /// Returns the local start time.
    #[must_use]
    pub const fn scheduled_at(&self) -> NaiveDateTime {
        self.0
    }

    /// Returns the day of the slot.
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.0.date()
    }

    /// Returns the hour of the slot.
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }
}

impl fmt::Display for SlotPrefill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(PREFILL_FORMAT))
    }
}

impl FromStr for SlotPrefill {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<SlotPrefill> for NaiveDateTime {
    fn from(value: SlotPrefill) -> Self {
        value.0
    }
}
