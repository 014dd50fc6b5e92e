//! Plain-text rendering for terminal output.

use chrono::{NaiveDate, NaiveDateTime};
use gearguard::calendar::{CalendarSettings, EventPlacement, MiniMonth, SlotPrefill, WeekLayout};
use gearguard::maintenance::domain::MaintenanceRequest;
use gearguard::maintenance::services::{RequestSummary, StageColumns};
use gearguard::session::domain::SessionUser;
use std::fmt::{self, Write};

const DAY_FORMAT: &str = "%a %d";

pub fn user(out: &mut impl Write, user: &SessionUser) -> fmt::Result {
    writeln!(out, "{} ({})", user.name(), user.role())?;
    writeln!(out, "id:   {}", user.id())?;
    match user.team_id() {
        Some(team) => writeln!(out, "team: {team}"),
        None => writeln!(out, "team: none"),
    }
}

fn request_line(out: &mut impl Write, request: &MaintenanceRequest) -> fmt::Result {
    write!(out, "  {}  {}", request.id(), request.subject())?;
    if let Some(name) = request.target().display_name() {
        write!(out, " @ {name}")?;
    }
    if let Some(technician) = request.technician() {
        write!(out, " -> {}", technician.name)?;
    }
    if let Some(at) = request.scheduled_date() {
        write!(out, " [{}]", at.format("%Y-%m-%d %H:%M"))?;
    }
    writeln!(out)
}

pub fn board(out: &mut impl Write, columns: &StageColumns) -> fmt::Result {
    for (stage, requests) in columns.iter() {
        writeln!(out, "{stage} ({})", requests.len())?;
        for request in requests {
            request_line(out, request)?;
        }
    }
    Ok(())
}

pub fn summary(out: &mut impl Write, summary: &RequestSummary) -> fmt::Result {
    write!(out, "{} requests, {} open:", summary.total, summary.open)?;
    for (stage, count) in &summary.by_stage {
        write!(out, " {stage}={count}")?;
    }
    writeln!(out)
}

pub fn moved(out: &mut impl Write, request: &MaintenanceRequest) -> fmt::Result {
    writeln!(out, "{} is now {}", request.id(), request.stage())?;
    request_line(out, request)
}

pub fn week(
    out: &mut impl Write,
    header: &str,
    layout: &WeekLayout,
    settings: &CalendarSettings,
    placements: &[EventPlacement<'_>],
    now: Option<(NaiveDateTime, f64)>,
) -> fmt::Result {
    writeln!(out, "{header}")?;
    for (column, day) in layout.days().iter().enumerate() {
        writeln!(out, "{}", day.format(DAY_FORMAT))?;
        if let Some((at, offset)) = now.filter(|(at, _)| at.date() == *day) {
            writeln!(out, "  now {} (offset {offset:.1})", at.format("%H:%M"))?;
        }
        let mut empty = true;
        for placement in placements.iter().filter(|item| item.column == column) {
            empty = false;
            writeln!(
                out,
                "  {:02}:00 +{:<5} {} [{}]",
                placement.hour,
                placement.top,
                placement.request.subject(),
                placement.request.stage()
            )?;
        }
        if empty {
            writeln!(out, "  -")?;
        }
    }
    writeln!(
        out,
        "hours {:02}:00-{:02}:59, grid height {}",
        settings.start_hour(),
        settings.end_hour(),
        settings.grid_height()
    )
}

pub fn up_next(out: &mut impl Write, requests: &[&MaintenanceRequest]) -> fmt::Result {
    writeln!(out, "Up next")?;
    if requests.is_empty() {
        return writeln!(out, "  nothing pending");
    }
    for request in requests {
        request_line(out, request)?;
    }
    Ok(())
}

pub fn month(out: &mut impl Write, month: &MiniMonth, today: NaiveDate) -> fmt::Result {
    writeln!(out, "{}", month.label())?;
    if let Some(first_row) = month.weeks().next() {
        let names: Vec<String> = first_row
            .iter()
            .map(|cell| cell.date.format("%a").to_string().chars().take(2).collect())
            .collect();
        writeln!(out, " {}", names.join("  "))?;
    }
    for row in month.weeks() {
        for cell in row {
            let day = cell.date.format("%e").to_string();
            match (cell.in_month, cell.date == today) {
                (false, _) => write!(out, "    ")?,
                (true, true) => write!(out, "[{day}]")?,
                (true, false) => write!(out, " {day} ")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn prefill(out: &mut impl Write, prefill: SlotPrefill) -> fmt::Result {
    let scheduled: NaiveDateTime = prefill.into();
    writeln!(out, "{prefill}")?;
    writeln!(out, "new request scheduled for {}", scheduled.format("%A %d %B, %H:%M"))
}
