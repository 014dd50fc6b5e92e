//! Error types for calendar computations.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for calendar computations.
pub type CalendarResult<T> = Result<T, CalendarError>;

/// Errors returned by calendar computations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalendarError {
    /// The visible hour range is empty or exceeds the day.
    #[error("invalid visible hours {start}..={end}, expected start <= end <= 23")]
    InvalidHourRange {
        /// First visible hour.
        start: u32,
        /// Last visible hour.
        end: u32,
    },

    /// Cells must have a height.
    #[error("cell height must be positive")]
    ZeroCellHeight,

    /// The cell height exceeds what the grid geometry can represent.
    #[error("cell height {height} exceeds the maximum of {max}")]
    CellHeightTooLarge {
        /// Requested height.
        height: u32,
        /// Largest accepted height.
        max: u32,
    },

    /// An hour outside 0–23 was given.
    #[error("hour {0} is outside 0..=23")]
    HourOutOfRange(u32),

    /// Date arithmetic left the supported calendar range.
    #[error("date {0} is too close to the supported calendar range limits")]
    DateOutOfRange(NaiveDate),

    /// A prefill string could not be parsed.
    #[error("invalid slot prefill '{0}', expected YYYY-MM-DDTHH:mm")]
    InvalidPrefill(String),
}
