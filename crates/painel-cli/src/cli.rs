//! CLI argument definitions for the monitoring panel.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use painel_model::{Category, DEFAULT_THRESHOLD_DAYS, ModelError};

#[derive(Parser)]
#[command(
    name = "painel",
    version,
    about = "Patient roster monitoring panel",
    long_about = "Merge the hypertensive and diabetic rosters, derive visit recency and\n\
                  neighborhood indicators, and report them per patient category."
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

    /// Allow patient identifiers and addresses in debug logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the first rows of both rosters without merging them.
    Preview(PreviewArgs),

    /// Merge both rosters and report indicators.
    Report(ReportArgs),
}

#[derive(Args)]
pub struct RosterArgs {
    /// Hypertensive roster (xlsx/xls/ods workbook or CSV export).
    #[arg(value_name = "HYPERTENSIVE")]
    pub hypertensive: PathBuf,

    /// Diabetic roster (xlsx/xls/ods workbook or CSV export).
    #[arg(value_name = "DIABETIC")]
    pub diabetic: PathBuf,
}

#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub rosters: RosterArgs,

    /// Number of rows to show from each roster.
    #[arg(long = "rows", default_value_t = 5)]
    pub rows: usize,
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub rosters: RosterArgs,

    /// Patient categories to chart (repeatable; `none` clears the selection).
    #[arg(
        long = "category",
        value_name = "CATEGORY",
        value_delimiter = ',',
        value_parser = parse_category_choice,
        default_values = ["hypertensive", "diabetic"]
    )]
    pub categories: Vec<CategoryChoice>,

    /// Days without a visit above which a patient counts as overdue.
    #[arg(long = "threshold-days", default_value_t = DEFAULT_THRESHOLD_DAYS)]
    pub threshold_days: i64,

    /// Reference date for recency (default: now).
    #[arg(long = "as-of", value_name = "YYYY-MM-DD")]
    pub as_of: Option<NaiveDate>,

    /// Output format for the indicators.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Write the unified table to a CSV file.
    #[arg(long = "export", value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// List the patients of the selected categories.
    #[arg(long = "show-records")]
    pub show_records: bool,

    /// Rows of each roster shown before asking for confirmation.
    #[arg(long = "preview-rows", default_value_t = 5)]
    pub preview_rows: usize,

    /// Confirm the rosters without prompting.
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
}

impl ReportArgs {
    /// Selected categories, deduplicated, in roster order.
    pub fn selected_categories(&self) -> Vec<Category> {
        if self.categories.contains(&CategoryChoice::None) {
            return Vec::new();
        }
        Category::ALL
            .into_iter()
            .filter(|category| {
                self.categories
                    .contains(&CategoryChoice::Category(*category))
            })
            .collect()
    }
}

/// One `--category` value: a patient category or `none`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryChoice {
    Category(Category),
    None,
}

fn parse_category_choice(value: &str) -> Result<CategoryChoice, ModelError> {
    if value.trim().eq_ignore_ascii_case("none") {
        return Ok(CategoryChoice::None);
    }
    value.parse().map(CategoryChoice::Category)
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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

#[cfg(test)]
mod tests {
    use super::*;

    fn report_args(extra: &[&str]) -> ReportArgs {
        let mut argv = vec!["painel", "report", "h.csv", "d.csv"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).expect("parse").command {
            Command::Report(args) => args,
            Command::Preview(_) => panic!("expected report"),
        }
    }

    #[test]
    fn command_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn report_defaults_select_both_categories() {
        let args = report_args(&[]);
        assert_eq!(args.selected_categories(), Category::ALL.to_vec());
        assert_eq!(args.threshold_days, DEFAULT_THRESHOLD_DAYS);
        assert_eq!(args.preview_rows, 5);
        assert!(!args.yes);
    }

    #[test]
    fn category_flag_accepts_lists_and_aliases() {
        let args = report_args(&["--category", "diabetico"]);
        assert_eq!(args.selected_categories(), vec![Category::Diabetic]);

        let args = report_args(&["--category", "diabetic,hypertensive"]);
        assert_eq!(args.selected_categories(), Category::ALL.to_vec());

        let args = report_args(&["--category", "none"]);
        assert!(args.selected_categories().is_empty());
    }

    #[test]
    fn category_flag_accepts_portuguese_labels() {
        let args = report_args(&["--category", "diabético"]);
        assert_eq!(args.selected_categories(), vec![Category::Diabetic]);

        let args = report_args(&["--category", "Hipertensos,DIABETICOS"]);
        assert_eq!(args.selected_categories(), Category::ALL.to_vec());
    }

    #[test]
    fn unknown_category_is_rejected() {
        let argv = ["painel", "report", "h.csv", "d.csv", "--category", "asthmatic"];
        let err = Cli::try_parse_from(argv).err().expect("parse error");
        assert!(err.to_string().contains("unknown patient category: asthmatic"));
    }

    #[test]
    fn as_of_parses_iso_date() {
        let args = report_args(&["--as-of", "2024-12-31", "--yes"]);
        assert_eq!(args.as_of, NaiveDate::from_ymd_opt(2024, 12, 31));
        assert!(args.yes);
    }
}
