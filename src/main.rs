//! `attribution-report`: check that every third-party dependency carries a
//! license permitted for the application's deployment context, and emit an
//! attribution report.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and load config ([`config::load_config`]).
//! 2. Build the license catalog, SPDX table and override table ([`license`]).
//! 3. Extract dependencies from the input manifest ([`analyzer`]).
//! 4. Filter proprietary packages, identify licenses, check restrictions and
//!    assemble the report ([`scan`]).
//! 5. Render the requested report ([`report`]) to stdout.
//!
//! Exit codes: `0` success, `1` dependency generation error, `2` invalid
//! arguments or configuration, `3` serialization failure, `4` write failure.

mod analyzer;
mod cli;
mod config;
mod error;
mod evaluator;
mod license;
mod models;
mod proprietary;
mod report;
mod scan;
mod wordwrap;

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use analyzer::Analyzer;
use cli::{Cli, InputFormat, OutputFormat};
use config::load_config;
use evaluator::ApplicationType;
use license::lookup::LicenseLookup;
use license::overrides::OverrideTable;
use license::spdx::SpdxTable;
use license::LicenseCatalog;
use models::DependencyInfo;
use proprietary::ProprietarySoftware;
use scan::Scanner;

/// Why a run failed, mapped to the process exit code.
#[derive(Debug, thiserror::Error)]
enum Failure {
    #[error("{0:#}")]
    Config(anyhow::Error),
    #[error("{0:#}")]
    Generate(anyhow::Error),
    #[error("could not serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write report: {0}")]
    Write(#[from] std::io::Error),
}

impl Failure {
    fn exit_code(&self) -> i32 {
        match self {
            Failure::Generate(_) => 1,
            Failure::Config(_) => 2,
            Failure::Serialize(_) => 3,
            Failure::Write(_) => 4,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(failure) = run(cli) {
        eprintln!("{failure}");
        std::process::exit(failure.exit_code());
    }
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        LevelFilter::INFO
    } else if cli.quiet {
        LevelFilter::ERROR
    } else {
        LevelFilter::WARN
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Failure> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let config = load_config(&cwd, cli.config.as_deref()).map_err(Failure::Config)?;

    let application = cli.application_type.unwrap_or(config.application.kind);
    let overrides_file = cli.unparsable_packages.as_deref().or(config.overrides.file.as_deref());
    let proprietary_file = cli
        .proprietary_software
        .as_deref()
        .or(config.proprietary.file.as_deref());

    let scanner = build_scanner(
        overrides_file,
        proprietary_file,
        &config.proprietary.packages,
    )
    .map_err(Failure::Config)?;

    let input = read_input(cli.input.as_deref()).map_err(Failure::Generate)?;
    let info = generate(&scanner, &input, cli.input_format, application).map_err(Failure::Generate)?;

    match cli.output_format {
        OutputFormat::Json => write_stdout(&report::json::render(&info)?)?,
        OutputFormat::Markdown => write_stdout(&report::markdown::render(&info))?,
        OutputFormat::Terminal => report::terminal::render(&info, application, cli.verbose, cli.quiet),
    }

    Ok(())
}

fn build_scanner(
    overrides_file: Option<&Path>,
    proprietary_file: Option<&Path>,
    extra_proprietary: &[String],
) -> Result<Scanner> {
    let catalog = LicenseCatalog::builtin()?;
    let spdx = SpdxTable::builtin(&catalog)?;
    let mut overrides = OverrideTable::builtin(&spdx)?;
    if let Some(path) = overrides_file {
        overrides.load_file(path, &spdx)?;
    }
    info!(
        catalog = catalog.version(),
        licenses = catalog.licenses().len(),
        identifiers = spdx.len(),
        overrides = overrides.len(),
        "license tables loaded"
    );

    let mut proprietary = ProprietarySoftware::new(extra_proprietary.iter().cloned());
    if let Some(path) = proprietary_file {
        proprietary.load_file(path)?;
    }
    info!(packages = proprietary.len(), "proprietary package list loaded");

    let lookup = LicenseLookup::new(spdx, overrides)?;
    Ok(Scanner::new(catalog, lookup, proprietary))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read dependency list from stdin")?;
            Ok(input)
        }
    }
}

fn generate(
    scanner: &Scanner,
    input: &str,
    format: InputFormat,
    application: ApplicationType,
) -> Result<DependencyInfo> {
    let context = application.restriction();

    let raw = match format {
        InputFormat::Npm => analyzer::node::NodeAnalyzer::new().analyze(input)?,
        InputFormat::Pip => analyzer::python::PythonAnalyzer::new().analyze(input)?,
        InputFormat::Cargo => analyzer::rust::RustAnalyzer::new().analyze(input)?,
        InputFormat::Normalized => analyzer::normalized::NormalizedAnalyzer::new().analyze(input)?,
        InputFormat::Report => {
            let dependencies = analyzer::report::ReportAnalyzer::new(scanner.catalog()).analyze(input)?;
            return Ok(scanner.revalidate(dependencies, context)?);
        }
    };

    if raw.is_empty() {
        warn!("no dependencies found in input");
    }
    Ok(scanner.scan(&raw, context)?)
}

fn write_stdout(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}
