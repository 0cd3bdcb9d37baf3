//! CLI argument definitions.

use std::path::PathBuf;

use alchemist_model::EntityKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "alchemist",
    version,
    about = "Reconcile, validate and clean client, worker and task data",
    long_about = "Reconcile messy spreadsheet headers onto the client, worker and task schemas,\n\
                  run field, anomaly and cross-entity validation, and export cleaned data."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Allow cell values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load, reconcile and validate data files.
    Validate(ValidateArgs),

    /// Show how a file's headers map onto the canonical fields.
    Map(FileArgs),

    /// List anomalies with suggested fixes.
    Anomalies(AnomaliesArgs),

    /// Filter rows by keyword.
    Search(SearchArgs),

    /// Write the bundled sample dataset as CSV files.
    Sample(SampleArgs),
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Clients file (.csv or .json).
    #[arg(long = "clients", value_name = "FILE")]
    pub clients: Option<PathBuf>,

    /// Workers file (.csv or .json).
    #[arg(long = "workers", value_name = "FILE")]
    pub workers: Option<PathBuf>,

    /// Tasks file (.csv or .json).
    #[arg(long = "tasks", value_name = "FILE")]
    pub tasks: Option<PathBuf>,

    /// Write cleaned CSVs and findings to this directory.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Rules configuration to copy into the output directory.
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,

    #[command(flatten)]
    pub options: CommonOptions,
}

impl ValidateArgs {
    pub fn inputs(&self) -> Vec<(EntityKind, &PathBuf)> {
        [
            (EntityKind::Client, self.clients.as_ref()),
            (EntityKind::Worker, self.workers.as_ref()),
            (EntityKind::Task, self.tasks.as_ref()),
        ]
        .into_iter()
        .filter_map(|(kind, path)| path.map(|p| (kind, p)))
        .collect()
    }
}

#[derive(Args)]
pub struct FileArgs {
    /// Data file (.csv or .json).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Entity kind held by the file.
    #[arg(long = "entity", value_enum)]
    pub entity: EntityArg,

    #[command(flatten)]
    pub options: CommonOptions,
}

#[derive(Args)]
pub struct AnomaliesArgs {
    #[command(flatten)]
    pub input: FileArgs,

    /// Maximum number of anomalies reported.
    #[arg(long = "max-anomalies", default_value_t = 10)]
    pub max_anomalies: usize,

    /// Apply every suggested fix in order.
    #[arg(long = "apply", requires = "out")]
    pub apply: bool,

    /// Where to write the fixed rows.
    #[arg(long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub input: FileArgs,

    /// Keyword query, for example "high priority" or "overloaded".
    #[arg(long = "query", default_value = "")]
    pub query: String,

    /// Only rows carrying a validation finding.
    #[arg(long = "errors-only")]
    pub errors_only: bool,
}

#[derive(Args)]
pub struct SampleArgs {
    /// Directory to write clients.csv, workers.csv and tasks.csv into.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,
}

#[derive(Args, Clone, Copy)]
pub struct CommonOptions {
    /// Output format for results.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Minimum similarity for an automatic header match.
    #[arg(long = "min-confidence", default_value_t = 0.3)]
    pub min_confidence: f32,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EntityArg {
    #[value(alias = "clients")]
    Client,
    #[value(alias = "workers")]
    Worker,
    #[value(alias = "tasks")]
    Task,
}

impl From<EntityArg> for EntityKind {
    fn from(arg: EntityArg) -> Self {
        match arg {
            EntityArg::Client => Self::Client,
            EntityArg::Worker => Self::Worker,
            EntityArg::Task => Self::Task,
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
