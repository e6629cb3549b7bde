//! CLI argument definitions for the echocardiogram report engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "eco-report",
    version,
    about = "Echocardiogram report engine - derived measurements and diagnostic text",
    long_about = "Compile an echocardiographic examination into a flat report record.\n\n\
                  Computes derived indices, classifies them against the reference\n\
                  range table and writes the diagnostic statements of every section."
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

    /// Allow patient identifiers (name, document) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile an examination JSON file into a report record.
    Report(ReportArgs),

    /// Classify a single value against the reference table.
    Classify(ClassifyArgs),

    /// List the reference ranges.
    Ranges(RangesArgs),

    /// Check the reference table for overlapping or missing bands.
    Check,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Examination snapshot (JSON object of form keys to values).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: ReportFormatArg,

    /// TOML file with engine options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Body surface area formula used when the examination names none.
    #[arg(long = "bsa-formula", value_enum)]
    pub bsa_formula: Option<BsaFormulaArg>,

    /// Read every wall measurement as millimetres.
    ///
    /// Disables the heuristic that treats operands below 10 as centimetres
    /// when computing relative wall thickness.
    #[arg(long = "strict-units")]
    pub strict_units: bool,

    /// Text written for values that could not be evaluated.
    #[arg(long = "absent-text", value_name = "TEXT")]
    pub absent_text: Option<String>,
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Reference table category (e.g. ventriculoIzquierdo).
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    /// Parameter inside the category (e.g. imvi).
    #[arg(value_name = "PARAMETER")]
    pub parameter: String,

    /// Measured value; comma decimals are accepted.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    /// Patient sex for sex-specific parameters.
    #[arg(long = "sex", value_enum)]
    pub sex: Option<SexArg>,
}

#[derive(Parser)]
pub struct RangesArgs {
    /// Only list this category.
    #[arg(long = "category", value_name = "CATEGORY")]
    pub category: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Json,
    Table,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BsaFormulaArg {
    Dubois,
    Mosteller,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SexArg {
    #[value(alias = "f")]
    Female,
    #[value(alias = "m")]
    Male,
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
