//! Scheduling calendar: week grid, now indicator and mini month.
//!
//! All computations use the viewer's local wall-clock time. Scheduled
//! timestamps are stored without a zone and are compared as-is; no time
//! zone conversion happens anywhere in this module.

mod error;
pub mod grid;
pub mod indicator;
pub mod month;
pub mod navigator;
mod settings;
pub mod slot;
pub mod week;

pub use error::{CalendarError, CalendarResult};
pub use grid::{EventPlacement, events_for, place_week};
pub use indicator::{NowIndicatorTicker, now_indicator_offset};
pub use month::{MiniMonth, MonthCell};
pub use navigator::CalendarNavigator;
pub use settings::CalendarSettings;
pub use slot::{SlotPrefill, slot_click};
pub use week::{WeekLayout, layout_week};
