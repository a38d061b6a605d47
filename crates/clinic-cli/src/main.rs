//! `clinic` CLI — run the calendar grouper and the table engine over JSON.
//!
//! ## Usage
//!
//! ```sh
//! # Group a day's appointments (stdin → stdout)
//! cat appointments.json | clinic group --date 2026-03-02 --timezone Europe/Berlin
//!
//! # Tighter cap, and keep back-to-back appointments apart
//! clinic group -i appointments.json --date 2026-03-02 --max-group-minutes 120 --no-touching
//!
//! # Build a table view: search, sort descending by age, second page of 5
//! clinic table -i patients.json --search ann --sort age --desc --page 2 --page-size 5
//!
//! # Use explicit columns and a serial-number column
//! clinic table -i patients.json --columns columns.json --serial
//!
//! # Show the columns auto-detected from the first row
//! clinic columns -i patients.json
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` or pass `-v` for more detail.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use schedule_engine::{Appointment, GroupingOptions};
use std::io::{self, Read};
use table_engine::{ColumnConfig, SortConfig, SortDirection, TableOptions, TableState};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "clinic",
    version,
    about = "Appointment grouping and table views for the clinic front end"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Group one day's appointments into calendar blocks
    Group {
        /// Input JSON array of appointments (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Calendar day the appointments belong to (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// IANA timezone of the clinic
        #[arg(long, default_value = "UTC")]
        timezone: String,
        /// Maximum span of one group in minutes
        #[arg(long, default_value_t = schedule_engine::grouping::DEFAULT_MAX_GROUP_DURATION_MINUTES)]
        max_group_minutes: i64,
        /// Do not merge appointments that only touch end-to-start
        #[arg(long)]
        no_touching: bool,
    },
    /// Search, sort and paginate rows into a table view
    Table {
        /// Input JSON array of row objects (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// JSON file with explicit column definitions
        #[arg(long)]
        columns: Option<String>,
        /// Case-insensitive search term
        #[arg(long, default_value = "")]
        search: String,
        /// Column key to sort by
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending instead of ascending (requires --sort)
        #[arg(long, requires = "sort")]
        desc: bool,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Rows per page
        #[arg(long, default_value_t = table_engine::view::DEFAULT_PAGE_SIZE)]
        page_size: usize,
        /// Prepend a serial-number column
        #[arg(long)]
        serial: bool,
        /// Do not derive columns from the first row
        #[arg(long)]
        no_auto_columns: bool,
        /// Comma-separated positional row ids to mark selected
        #[arg(long)]
        selected: Option<String>,
    },
    /// Print the columns auto-detected from the first row
    Columns {
        /// Input JSON array of row objects (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Group {
            input,
            output,
            date,
            timezone,
            max_group_minutes,
            no_touching,
        } => {
            let json = read_input(input.as_deref())?;
            let appointments: Vec<Appointment> =
                serde_json::from_str(&json).context("Failed to parse appointments JSON")?;
            schedule_engine::validate_appointments(&appointments)
                .context("Invalid appointment data")?;

            let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
                .with_context(|| format!("Invalid --date '{}': expected YYYY-MM-DD", date))?;
            let options = GroupingOptions {
                max_group_duration_minutes: max_group_minutes,
                treat_touching_as_overlap: !no_touching,
            };

            let groups =
                schedule_engine::group_appointments_on(&appointments, date, &timezone, &options)
                    .context("Failed to group appointments")?;
            tracing::info!(groups = groups.len(), %date, "grouped day");

            write_output(output.as_deref(), &serde_json::to_string_pretty(&groups)?)?;
        }
        Commands::Table {
            input,
            output,
            columns,
            search,
            sort,
            desc,
            page,
            page_size,
            serial,
            no_auto_columns,
            selected,
        } => {
            let json = read_input(input.as_deref())?;
            let rows = table_engine::rows_from_json(&json).context("Failed to parse rows JSON")?;
            let explicit = columns.as_deref().map(read_columns).transpose()?;

            let options = TableOptions {
                auto_detect_columns: !no_auto_columns,
                serial_number: serial,
                page_size,
                ..TableOptions::default()
            };
            let state = TableState {
                search_term: search,
                sort: SortConfig {
                    direction: match (&sort, desc) {
                        (None, _) => SortDirection::None,
                        (Some(_), false) => SortDirection::Asc,
                        (Some(_), true) => SortDirection::Desc,
                    },
                    key: sort,
                },
                page,
                page_size: Some(page_size),
                selected_ids: parse_selection(selected.as_deref()),
            };

            let view = table_engine::build_view(&rows, explicit.as_deref(), &options, &state);
            tracing::info!(
                shown = view.rows.len(),
                total = view.total_rows,
                "built table view"
            );

            write_output(output.as_deref(), &serde_json::to_string_pretty(&view)?)?;
        }
        Commands::Columns { input } => {
            let json = read_input(input.as_deref())?;
            let rows = table_engine::rows_from_json(&json).context("Failed to parse rows JSON")?;
            let columns = table_engine::resolve_columns(None, &rows, true, false);
            println!("{}", serde_json::to_string_pretty(&columns)?);
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays valid JSON. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_columns(path: &str) -> Result<Vec<ColumnConfig>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read columns file: {}", path))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid columns JSON in {}", path))
}

/// `--selected 1,3,4` → `{"1","3","4"}`; blanks are skipped.
fn parse_selection(raw: Option<&str>) -> table_engine::Selection {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
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
