use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "HEScore Ruleset Developers",
    version,
    about = "HEScore CLI - Validates sparse Home Energy Score building characterizations and translates them into fully specified building descriptions.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a building characterization against the content model and list every violation.
    Validate(ValidateArgs),
    /// Translate a building characterization into a full building description.
    Translate(TranslateArgs),
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the JSON-encoded building characterization.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}

/// Arguments for the `translate` subcommand.
#[derive(Args, Debug)]
pub struct TranslateArgs {
    // --- Core Arguments ---
    /// Path to the JSON-encoded building characterization.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the JSON building description. Written to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a translation configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding replacement assembly R-value tables (CSV).
    #[arg(long, value_name = "DIR")]
    pub tables: Option<PathBuf>,

    // --- Configuration Overrides ---
    /// Translate even when the input violates the content model.
    #[arg(long)]
    pub skip_validation: bool,

    /// Override the schema version stamped on the output.
    #[arg(long, value_name = "VERSION")]
    pub schema_version: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}
