use std::path::PathBuf;

use clap::Parser;

use crate::evaluator::ApplicationType;

#[derive(Parser, Debug)]
#[command(
    name = "attribution-report",
    about = "Check dependency licenses and generate a third-party attribution report",
    version
)]
pub struct Cli {
    /// Read the dependency list from this file instead of stdin
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Format of the dependency list
    #[arg(long, default_value = "normalized", value_name = "FORMAT")]
    pub input_format: InputFormat,

    /// Report format
    #[arg(long, default_value = "json", value_name = "FORMAT")]
    pub output_format: OutputFormat,

    /// Where the application runs [default: from config, else external]
    #[arg(long, value_name = "TYPE")]
    pub application_type: Option<ApplicationType>,

    /// YAML list of extra package names to exclude as proprietary
    #[arg(long, value_name = "PATH")]
    pub proprietary_software: Option<PathBuf>,

    /// YAML map of `name` or `name@version` to SPDX identifiers for packages whose license can't be parsed
    #[arg(long, value_name = "PATH")]
    pub unparsable_packages: Option<PathBuf>,

    /// Config file [default: ./.attribution-report/config.toml, fallback ~/.config/attribution-report/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show all dependencies in terminal output and log pipeline progress
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// `license-checker --json` output
    Npm,
    /// `pip-licenses --format=json` output
    Pip,
    /// `cargo metadata --format-version 1` output
    Cargo,
    /// JSON list of `{name, version, license, replaces}`
    Normalized,
    /// A previously generated JSON report, re-validated
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}
