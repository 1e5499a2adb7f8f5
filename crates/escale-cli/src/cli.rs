//! CLI argument definitions for the escale client.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use escale_cli::render::DEFAULT_COLUMNS;

#[derive(Parser)]
#[command(
    name = "escale",
    version,
    about = "Terminal client for Excel-backed port call sheets",
    long_about = "Browse, sort and edit the rows of Excel sheets served by the escale\n\
                  backend. Draft up to ten rows at a time, validate every cell against\n\
                  the sheet's column types, and submit only once everything passes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the backend API.
    #[arg(
        long = "base-url",
        value_name = "URL",
        env = "ESCALE_BASE_URL",
        default_value = "http://localhost:8000/api",
        global = true
    )]
    pub base_url: String,

    /// Bearer token authenticating the session.
    #[arg(
        long = "token",
        value_name = "TOKEN",
        env = "ESCALE_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub token: Option<String>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the column layout of a sheet.
    Schema(SchemaArgs),

    /// Fetch the rows of a sheet, optionally sorted and filtered.
    View(ViewArgs),

    /// Draft new rows, validate them and append them to a sheet.
    Add(AddArgs),

    /// Edit one persisted row in place.
    Edit(EditArgs),

    /// Delete one persisted row.
    Delete(DeleteArgs),

    /// Download the whole workbook.
    Download(DownloadArgs),
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Workbook filename on the server.
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Sheet name inside the workbook.
    #[arg(value_name = "SHEET")]
    pub sheet: String,

    /// Also infer each column's observed type from the sheet's rows.
    #[arg(long = "profile")]
    pub profile: bool,
}

#[derive(Parser)]
#[command(group(ArgGroup::new("order").args(["sort", "by"])))]
pub struct ViewArgs {
    /// Workbook filename on the server.
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Sheet name inside the workbook.
    #[arg(value_name = "SHEET")]
    pub sheet: String,

    /// Sort by this column (ascending unless --desc).
    #[arg(long = "sort", value_name = "COLUMN")]
    pub sort: Option<String>,

    /// Sort by a well-known column located by keyword.
    #[arg(long = "by", value_enum, value_name = "SHORTCUT")]
    pub by: Option<QuickSortArg>,

    /// Reverse the sort direction.
    #[arg(long = "desc", requires = "order")]
    pub desc: bool,

    /// Keep only rows where some cell contains this text.
    #[arg(long = "search", value_name = "TERM")]
    pub search: Option<String>,

    /// Show at most this many rows.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Number of sheet columns to render.
    #[arg(long = "columns", value_name = "N", default_value_t = DEFAULT_COLUMNS)]
    pub columns: usize,
}

#[derive(Parser)]
pub struct AddArgs {
    /// Workbook filename on the server.
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Sheet name inside the workbook.
    #[arg(value_name = "SHEET")]
    pub sheet: String,

    /// Set one cell of the drafted row, e.g. --set "Navire=MV Atlas".
    #[arg(
        long = "set",
        value_name = "COL=VALUE",
        value_parser = parse_key_value,
        conflicts_with = "from_csv"
    )]
    pub set: Vec<(String, String)>,

    /// Draft up to ten rows from a local CSV file instead of --set.
    #[arg(long = "from-csv", value_name = "PATH")]
    pub from_csv: Option<PathBuf>,
}

#[derive(Parser)]
pub struct EditArgs {
    /// Workbook filename on the server.
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Sheet name inside the workbook.
    #[arg(value_name = "SHEET")]
    pub sheet: String,

    /// Backend id of the row to edit.
    #[arg(value_name = "ROW_ID")]
    pub row_id: i64,

    /// Overwrite one cell of the fetched row, e.g. --set "Tonnage=1200".
    #[arg(
        long = "set",
        value_name = "COL=VALUE",
        value_parser = parse_key_value,
        required = true
    )]
    pub set: Vec<(String, String)>,
}

#[derive(Parser)]
pub struct DeleteArgs {
    /// Workbook filename on the server.
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Sheet name inside the workbook.
    #[arg(value_name = "SHEET")]
    pub sheet: String,

    /// Backend id of the row to delete.
    #[arg(value_name = "ROW_ID")]
    pub row_id: i64,

    /// Skip the confirmation prompt.
    #[arg(long = "yes", short = 'y')]
    pub yes: bool,
}

#[derive(Parser)]
pub struct DownloadArgs {
    /// Workbook filename on the server.
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Where to write the workbook (defaults to the server filename).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Quick-sort shortcut choices for `view --by`.
#[derive(Clone, Copy, ValueEnum)]
pub enum QuickSortArg {
    /// The vessel name column.
    Vessel,
    /// The bill of lading date column.
    BlDate,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Parse a `COL=VALUE` argument into its two halves.
fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected COL=VALUE, got {raw:?}")),
    }
}
