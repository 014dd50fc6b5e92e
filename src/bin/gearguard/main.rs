//! Terminal front-end for the `GearGuard` maintenance backend.
//!
//! Usage:
//!
//! ```text
//! gearguard [--config <path>] <command>
//! ```
//!
//! The session is kept in the configured state directory, so `login` once and
//! later commands run as that user. Calendar commands work offline except
//! `week`, which fetches the requests to place on the grid.

mod render;

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gearguard::calendar::{
    CalendarNavigator, MiniMonth, now_indicator_offset, place_week, slot_click,
};
use gearguard::config::ClientConfig;
use gearguard::gateway::http::HttpGateway;
use gearguard::ids::RequestId;
use gearguard::maintenance::domain::Stage;
use gearguard::maintenance::services::{
    KanbanBoard, RequestQuery, RequestService, RequestSummary, up_next,
};
use gearguard::session::adapters::FileSessionStorage;
use gearguard::session::domain::{Credentials, Role, SignupRequest};
use gearguard::session::services::SessionService;
use mockable::{Clock, DefaultClock};
use std::fmt::Write as _;
use std::io::{self, Write as _};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Number of pending requests listed beside the week grid.
const UP_NEXT_LIMIT: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "gearguard")]
#[command(author, version, about = "Maintenance requests, Kanban board and calendar", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "GEARGUARD_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Override log level
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and remember the session
    Login {
        /// Account email
        email: String,
        /// Account password
        #[arg(long, env = "GEARGUARD_PASSWORD")]
        password: String,
    },

    /// Create an account
    Signup {
        /// Display name
        name: String,
        /// Account email
        email: String,
        /// Account password
        #[arg(long, env = "GEARGUARD_PASSWORD")]
        password: String,
        /// `user` or `technician`
        #[arg(long, default_value = "user", value_parser = parse_role)]
        role: Role,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user, refreshed from the backend
    Whoami,

    /// Show the Kanban board
    Board {
        /// Only requests whose subject or target contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Only requests filed by the logged-in user
        #[arg(long)]
        mine: bool,
    },

    /// Move a request between stage columns
    Move {
        /// Request identifier
        id: String,
        /// Column the card is in
        #[arg(value_parser = parse_stage)]
        from: Stage,
        /// Column to drop it on
        #[arg(value_parser = parse_stage)]
        to: Stage,
    },

    /// Delete a request
    Delete {
        /// Request identifier
        id: String,
    },

    /// Show the week grid around a date
    Week {
        /// Any day of the week to show; defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Show the mini month around a date
    Month {
        /// Any day of the month to show; defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Print the schedule prefill for a grid cell
    Slot {
        /// Day of the cell
        date: NaiveDate,
        /// Hour row of the cell
        hour: u32,
    },
}

fn parse_stage(value: &str) -> Result<Stage, String> {
    Stage::try_from(value).map_err(|err| err.to_string())
}

fn parse_role(value: &str) -> Result<Role, String> {
    Role::try_from(value).map_err(|err| err.to_string())
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let config = ClientConfig::load(cli.config.as_deref())?;
    init_tracing(cli.log_level.as_deref().unwrap_or(&config.logging.level));
    debug!(backend = %config.backend.base_url, "configuration loaded");

    let output = run(cli.command, &config).await?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(command: Command, config: &ClientConfig) -> Result<String, BoxError> {
    let clock = DefaultClock;
    let mut out = String::new();

    // Calendar views that need no backend.
    match &command {
        Command::Month { date } => {
            let today = clock.local().date_naive();
            let month = MiniMonth::new(date.unwrap_or(today), config.calendar.week_start())?;
            render::month(&mut out, &month, today)?;
            return Ok(out);
        }
        Command::Slot { date, hour } => {
            render::prefill(&mut out, slot_click(*date, *hour)?)?;
            return Ok(out);
        }
        _ => {}
    }

    let gateway = Arc::new(HttpGateway::from_config(&config.backend)?);
    let storage = Arc::new(FileSessionStorage::open(&config.session.state_dir)?);
    let mut session = SessionService::restore(Arc::clone(&gateway), storage)?;
    let requests = RequestService::new(Arc::clone(&gateway));

    match command {
        Command::Login { email, password } => {
            let user = session.login(&Credentials::new(email, password)?).await?;
            render::user(&mut out, user)?;
        }
        Command::Signup {
            name,
            email,
            password,
            role,
        } => {
            let id = session
                .signup(&SignupRequest::new(name, email, password, role)?)
                .await?;
            writeln!(out, "account {id} created; log in to continue")?;
        }
        Command::Logout => {
            session.logout()?;
            writeln!(out, "logged out")?;
        }
        Command::Whoami => {
            let user = session.refresh_profile().await?;
            render::user(&mut out, user)?;
        }
        Command::Board { search, mine } => {
            let viewer = session.require_user()?.clone();
            let query = search
                .map_or_else(RequestQuery::new, |text| RequestQuery::new().with_search(text))
                .mine_only(mine);
            let visible = requests.list_visible(&viewer, &query).await?;
            let board = KanbanBoard::from_snapshot(Arc::clone(&gateway), viewer, &visible);
            render::summary(&mut out, &RequestSummary::from_requests(board.requests()))?;
            render::board(&mut out, &board.columns())?;
        }
        Command::Move { id, from, to } => {
            let viewer = session.require_user()?.clone();
            let request_id = RequestId::new(id)?;
            let mut board = KanbanBoard::load(Arc::clone(&gateway), viewer).await?;
            let moved = board.move_stage(&request_id, from, to).await?;
            render::moved(&mut out, moved)?;
        }
        Command::Delete { id } => {
            let viewer = session.require_user()?.clone();
            let request_id = RequestId::new(id)?;
            requests.delete(&viewer, &request_id).await?;
            writeln!(out, "request {request_id} deleted")?;
        }
        Command::Week { date } => {
            let viewer = session.require_user()?.clone();
            let now = clock.local().naive_local();
            let navigator = CalendarNavigator::new(config.calendar, date.unwrap_or(now.date()));
            let layout = navigator.week()?;
            let visible = requests.list_visible(&viewer, &RequestQuery::new()).await?;
            let placements = place_week(&layout, &config.calendar, &visible);
            let indicator = now_indicator_offset(&config.calendar, now)
                .filter(|_| layout.contains(now.date()))
                .map(|offset| (now, offset));
            render::week(
                &mut out,
                &navigator.header(),
                &layout,
                &config.calendar,
                &placements,
                indicator,
            )?;
            render::up_next(&mut out, &up_next(&visible, UP_NEXT_LIMIT))?;
        }
        Command::Month { .. } | Command::Slot { .. } => {}
    }
    Ok(out)
}
