//! `meet` CLI: merge busy time, find common free slots, check proposals and
//! lay out day views from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Merge busy intervals (stdin → stdout)
//! echo '[{"start":"2026-03-16T09:00:00Z","end":"2026-03-16T10:00:00Z"}]' | meet merge
//!
//! # Common free slots of two people, from a directory snapshot
//! meet free-slots --directory team.json --date 2026-03-16 --attendees anna,bartek
//!
//! # First slot of at least 45 minutes
//! meet free-slots --directory team.json --date 2026-03-16 --attendees anna,bartek --min-duration 45
//!
//! # Check a proposed meeting (start in the reference zone)
//! meet check --directory team.json --organizer anna --attendees bartek \
//!     --start 2026-03-16T12:00 --duration 30
//!
//! # Lay out a day's events into columns
//! meet layout -i events.json
//!
//! # Day view of one user
//! meet day --directory team.json --user anna --date 2026-03-16
//!
//! # Custom configuration, verbose logging
//! RUST_LOG=debug meet --config scheduling.json day --directory team.json --user anna --date 2026-03-16
//! ```

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use meet_engine::freebusy::find_first_free_slot;
use meet_engine::layout::DayEvent;
use meet_engine::scheduler::parse_attendee_list;
use meet_engine::{InMemoryDirectory, Interval, MeetingProposal, Scheduler, SchedulingConfig};
use std::io::{self, Read};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "meet",
    version,
    about = "Meeting availability and day-view layout"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Scheduling configuration file (JSON); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge overlapping or touching busy intervals
    Merge {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Free time shared by all attendees during working hours
    FreeSlots {
        /// Directory snapshot file (JSON)
        #[arg(long)]
        directory: String,
        /// Day to search, YYYY-MM-DD in the reference zone
        #[arg(long)]
        date: NaiveDate,
        /// Comma-separated attendee list
        #[arg(long)]
        attendees: String,
        /// Only print the first slot lasting at least this many minutes
        #[arg(long)]
        min_duration: Option<i64>,
    },
    /// Check whether a proposed meeting fits everyone's free time
    Check {
        /// Directory snapshot file (JSON)
        #[arg(long)]
        directory: String,
        #[arg(long)]
        organizer: String,
        /// Comma-separated attendee list
        #[arg(long)]
        attendees: String,
        /// Start, YYYY-MM-DDTHH:MM in the reference zone
        #[arg(long)]
        start: String,
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
        #[arg(long)]
        subject: Option<String>,
    },
    /// Assign day-view columns to a JSON array of events
    Layout {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// One user's events for a day, laid out in columns
    Day {
        /// Directory snapshot file (JSON)
        #[arg(long)]
        directory: String,
        #[arg(long)]
        user: String,
        /// YYYY-MM-DD in the reference zone
        #[arg(long)]
        date: NaiveDate,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Merge { input, output } => {
            let json = read_input(input.as_deref())?;
            let busy: Vec<Interval> =
                serde_json::from_str(&json).context("Failed to parse busy intervals")?;
            let merged = meet_engine::merge_busy_intervals(&busy);
            debug!(input = busy.len(), merged = merged.len(), "merged busy intervals");
            write_output(output.as_deref(), &serde_json::to_string_pretty(&merged)?)?;
        }
        Commands::FreeSlots {
            directory,
            date,
            attendees,
            min_duration,
        } => {
            let directory = load_directory(&directory)?;
            let scheduler = Scheduler::new(&directory, &config);
            let free = scheduler
                .common_free_slots(&parse_attendee_list(&attendees), date)
                .context("Failed to compute common free slots")?;

            let pretty = match min_duration {
                Some(minutes) => match find_first_free_slot(&free, minutes) {
                    Some(slot) => serde_json::to_string_pretty(slot)?,
                    None => {
                        eprintln!("No free slot of {} minutes or more on {}", minutes, date);
                        process::exit(1);
                    }
                },
                None => serde_json::to_string_pretty(&free)?,
            };
            write_output(None, &pretty)?;
        }
        Commands::Check {
            directory,
            organizer,
            attendees,
            start,
            duration,
            subject,
        } => {
            let directory = load_directory(&directory)?;
            let scheduler = Scheduler::new(&directory, &config);
            let local = NaiveDateTime::parse_from_str(&start, "%Y-%m-%dT%H:%M")
                .with_context(|| format!("Invalid start '{}', expected YYYY-MM-DDTHH:MM", start))?;

            let proposal = MeetingProposal {
                organizer,
                attendees: parse_attendee_list(&attendees),
                start: scheduler.local_to_utc(local)?,
                duration_minutes: duration,
                subject,
            };
            let verdict = scheduler
                .check_proposal(&proposal)
                .context("Failed to check meeting proposal")?;
            write_output(None, &serde_json::to_string_pretty(&verdict)?)?;
        }
        Commands::Layout { input, output } => {
            let json = read_input(input.as_deref())?;
            let events: Vec<DayEvent> =
                serde_json::from_str(&json).context("Failed to parse day events")?;
            let laid_out = meet_engine::lay_out_day(&events);
            write_output(output.as_deref(), &serde_json::to_string_pretty(&laid_out)?)?;
        }
        Commands::Day {
            directory,
            user,
            date,
        } => {
            let directory = load_directory(&directory)?;
            let view = Scheduler::new(&directory, &config)
                .day_view(&user, date)
                .with_context(|| format!("Failed to build day view for {}", user))?;
            write_output(None, &serde_json::to_string_pretty(&view)?)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&str>) -> Result<SchedulingConfig> {
    match path {
        Some(path) => {
            let json = read_input(Some(path))?;
            SchedulingConfig::from_json(&json)
                .with_context(|| format!("Invalid configuration in {}", path))
        }
        None => Ok(SchedulingConfig::default()),
    }
}

fn load_directory(path: &str) -> Result<InMemoryDirectory> {
    let json = read_input(Some(path))?;
    InMemoryDirectory::from_json(&json)
        .with_context(|| format!("Failed to parse directory snapshot: {}", path))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
