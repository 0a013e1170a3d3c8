mod config;
mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing::{error, info};

use config::FileConfig;
use logging::init_logging;
use rhythmseed_generate::assets::COUNTRIES_FILE;
use rhythmseed_generate::{
    GenerateOptions, GenerationEngine, GenerationError, render_dataset, write_sql,
};

/// File name of the SQL artifact when `--out` is not given.
const DEFAULT_OUTPUT_FILE: &str = "osu_demo_data.sql";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("config {path}: {detail}")]
    Config { path: PathBuf, detail: String },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "rhythmseed",
    version,
    about = "Generate SQL inserts for a rhythm-game demo database"
)]
struct Cli {
    /// Seed for the random generator.
    #[arg(long)]
    seed: Option<u64>,
    /// Output SQL file; defaults to osu_demo_data.sql next to the executable.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
    /// Directory holding a countries.csv reference list.
    #[arg(long, value_name = "DIR", conflicts_with = "countries")]
    assets: Option<PathBuf>,
    /// Reference country list (`code,name` CSV).
    #[arg(long, value_name = "CSV")]
    countries: Option<PathBuf>,
    /// Skip the reference country list and generate countries.
    #[arg(long, default_value_t = false)]
    no_reference: bool,
    /// Also write the generation report as JSON.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
    /// TOML file with seed, anchor_date and [counts] overrides.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Emit logs as JSON lines.
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(cli.log_json) {
        eprintln!("ERROR: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_failure(&err);
            eprintln!("ERROR: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let options = resolve_options(&cli)?;
    let out = cli.out.clone().unwrap_or_else(default_output_path);

    let result = GenerationEngine::new(options).generate()?;
    let lines = render_dataset(&result.dataset);
    let mut report = result.report;

    // A failed write leaves the exit status untouched.
    match write_sql(&out, &lines) {
        Ok(bytes) => {
            report.lines_written = Some(lines.len() as u64);
            report.bytes_written = Some(bytes);
            let shown = std::path::absolute(&out).unwrap_or_else(|_| out.clone());
            info!(path = %shown.display(), lines = lines.len(), bytes, "sql written");
            println!("Wrote {} SQL lines to: {}", lines.len(), shown.display());
        }
        Err(source) => report_write_failure(CliError::Write { path: out, source }),
    }

    if let Some(path) = &cli.report {
        match report.write_json(path) {
            Ok(()) => info!(path = %path.display(), "report written"),
            Err(err) => report_write_failure(format!("report {}: {err}", path.display())),
        }
    }
    Ok(())
}

/// Compiled-in defaults, then the config file, then command-line flags.
fn resolve_options(cli: &Cli) -> Result<GenerateOptions, CliError> {
    let mut options = match &cli.config {
        Some(path) => FileConfig::load(path)?.to_options(),
        None => GenerateOptions::default(),
    };
    if let Some(seed) = cli.seed {
        options.seed = seed;
    }
    if let Some(dir) = &cli.assets {
        options.countries_path = Some(dir.join(COUNTRIES_FILE));
    }
    if let Some(path) = &cli.countries {
        options.countries_path = Some(path.clone());
    }
    if cli.no_reference {
        options.use_reference_countries = false;
    }
    Ok(options)
}

fn default_output_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default()
        .join(DEFAULT_OUTPUT_FILE)
}

fn report_write_failure(err: impl std::fmt::Display) {
    error!(error = %err, "write failed");
    eprintln!("ERROR writing output: {err}");
}

fn log_failure(err: &CliError) {
    match err {
        CliError::Generation(GenerationError::Integrity(rhythmseed_core::Error::Integrity {
            table,
            field,
            detail,
        })) => error!(table, field, detail = %detail, "integrity violation, nothing written"),
        CliError::Generation(GenerationError::InvalidConfig(detail)) => {
            error!(detail = %detail, "invalid configuration, nothing written")
        }
        other => error!(error = %other, "generation failed"),
    }
}
