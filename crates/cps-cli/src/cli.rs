//! CLI argument definitions for `cps`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use cps_model::RecordType;

#[derive(Parser)]
#[command(
    name = "cps",
    version,
    about = "Crop planning CSV tool - import, convert and inspect crop lists and plans",
    long_about = "Import, convert and inspect crop planning CSV files.\n\n\
                  Handles two sheets: the crop and variety list, and crop plans\n\
                  (one row per planting)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    #[command(flatten)]
    pub csv: CsvArgs,
}

/// CSV dialect settings shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct CsvArgs {
    /// TOML file with CSV options (quote, comment, date formats, ...).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Field separator (overrides the config file).
    #[arg(long = "delimiter", value_name = "CHAR", global = true)]
    pub delimiter: Option<char>,

    /// Comment line prefix (overrides the config file).
    #[arg(long = "comment", value_name = "CHAR", global = true)]
    pub comment: Option<char>,

    /// Text qualifier (overrides the config file).
    #[arg(long = "quote", value_name = "CHAR", global = true)]
    pub quote: Option<char>,

    /// chrono format for dates written on export, e.g. `%m/%d/%Y`.
    #[arg(long = "date-format", value_name = "FORMAT", global = true)]
    pub date_format: Option<String>,

    /// Match header names to columns ignoring case.
    #[arg(long = "ignore-header-case", global = true)]
    pub ignore_header_case: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a file and summarize what was read.
    Import(ImportArgs),

    /// Import a file and write it back out in canonical form.
    ///
    /// Dates are rewritten in the output format and columns that do not
    /// belong to the record type are dropped.
    Convert(ConvertArgs),

    /// Look up a base crop (no variety) in a crop list.
    Lookup(LookupArgs),

    /// List the column names of a record type.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// CSV file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Which sheet the file holds.
    #[arg(long = "kind", value_enum, default_value = "plantings")]
    pub kind: RecordKindArg,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// CSV file to read.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Destination file (replaced atomically).
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Which sheet the file holds.
    #[arg(long = "kind", value_enum, default_value = "plantings")]
    pub kind: RecordKindArg,

    /// Plan name written to the export header (default: input file stem).
    #[arg(long = "label", value_name = "NAME")]
    pub label: Option<String>,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// Crop list to search.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Crop name, matched ignoring case.
    #[arg(value_name = "CROP")]
    pub crop: String,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    #[arg(long = "kind", value_enum, default_value = "plantings")]
    pub kind: RecordKindArg,
}

/// CLI record type choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKindArg {
    Crops,
    Plantings,
}

impl RecordKindArg {
    pub fn record_type(self) -> RecordType {
        match self {
            RecordKindArg::Crops => RecordType::Crop,
            RecordKindArg::Plantings => RecordType::Planting,
        }
    }
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
