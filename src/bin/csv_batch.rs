//! Offline CSV batch conversion.
//!
//! Reads a two-column CSV (`weight`, `dirt`), runs the inference core per
//! row and writes the same CSV with a `Wash Speed (RPM)` column appended.
//!
//! Usage:
//!   cargo run --bin csv-batch -- --input loads.csv
//!   cargo run --bin csv-batch -- --input loads.csv --output loads_speeds.csv

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use washsense::batch;
use washsense::config::{self, MachineConfig};

/// CSV batch conversion for washsense.
#[derive(Parser)]
#[command(name = "csv-batch")]
struct Args {
    /// Input CSV path with `weight` and `dirt` columns.
    #[arg(long, short)]
    input: PathBuf,

    /// Output CSV path. Defaults to `<input stem>_speeds.csv`.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "batch".to_string());
    input.with_file_name(format!("{stem}_speeds.csv"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    config::init(MachineConfig::load());

    let output = args.output.unwrap_or_else(|| default_output(&args.input));

    let rows = batch::process_file(&args.input, &output)
        .with_context(|| format!("Failed to process {}", args.input.display()))?;

    println!("Processed {rows} row(s)");
    println!("Output written to {}", output.display());

    Ok(())
}
