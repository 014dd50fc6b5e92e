//! Placement of scheduled requests on the hour grid.

use super::{CalendarSettings, WeekLayout};
use crate::maintenance::domain::MaintenanceRequest;
use chrono::{NaiveDate, Timelike};

/// Requests scheduled on `day` during `hour`, in input order.
///
/// Matching compares local calendar date and hour only; minutes are ignored.
/// Requests without a schedule never match.
#[must_use]
pub fn events_for(
    day: NaiveDate,
    hour: u32,
    requests: &[MaintenanceRequest],
) -> Vec<&MaintenanceRequest> {
    requests
        .iter()
        .filter(|request| {
            request
                .scheduled_date()
                .is_some_and(|at| at.date() == day && at.hour() == hour)
        })
        .collect()
}

/// A request positioned in the week grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventPlacement<'a> {
    /// The scheduled request.
    pub request: &'a MaintenanceRequest,
    /// Column, counted from the week start.
    pub column: usize,
    /// Hour row.
    pub hour: u32,
    /// Top offset of the row.
    pub top: u32,
}

/// Places every request scheduled inside the visible week and hours.
///
/// Requests outside the visible hours are not placed. Placements are ordered
/// by column, then hour, then input order.
#[must_use]
pub fn place_week<'a>(
    week: &WeekLayout,
    settings: &CalendarSettings,
    requests: &'a [MaintenanceRequest],
) -> Vec<EventPlacement<'a>> {
    let mut placements = Vec::new();
    for (column, day) in week.days().iter().enumerate() {
        for hour in settings.time_slots() {
            let Some(top) = settings.slot_top(hour) else {
                continue;
            };
            placements.extend(events_for(*day, hour, requests).into_iter().map(|request| {
                EventPlacement {
                    request,
                    column,
                    hour,
                    top,
                }
            }));
        }
    }
    placements
}
