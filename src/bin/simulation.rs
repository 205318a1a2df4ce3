//! Synthetic load generator.
//!
//! Produces (weight, dirt) input pairs for exercising washsense without a
//! physical machine: normally distributed around configurable centres,
//! clamped to the [0, 10] universe, as CSV or JSON lines on stdout.
//!
//! # Usage
//! ```bash
//! ./simulation --rows 100 > loads.csv
//! ./simulation --rows 50 --format json --seed 7
//! ```

use clap::Parser;
use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use std::io::{self, Write};

// ============================================================================
// Universe Constants
// ============================================================================

/// Input universe bounds (both axes)
const INPUT_MIN: f64 = 0.0;
const INPUT_MAX: f64 = 10.0;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "wash-simulation")]
#[command(about = "Synthetic load generation for washsense testing")]
#[command(version)]
struct Args {
    /// Number of rows to generate
    #[arg(short, long, default_value = "100", value_parser = clap::value_parser!(u32).range(1..=1_000_000))]
    rows: u32,

    /// Output format: csv or json
    #[arg(short, long, default_value = "csv")]
    format: String,

    /// Mean load weight (kg)
    #[arg(long, default_value = "5.0")]
    mean_weight: f64,

    /// Mean dirt level
    #[arg(long, default_value = "5.0")]
    mean_dirt: f64,

    /// Standard deviation for both inputs
    #[arg(long, default_value = "2.5")]
    std_dev: f64,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let weight_dist = Normal::new(args.mean_weight, args.std_dev)
        .map_err(|e| anyhow::anyhow!("invalid weight distribution: {e}"))?;
    let dirt_dist = Normal::new(args.mean_dirt, args.std_dev)
        .map_err(|e| anyhow::anyhow!("invalid dirt distribution: {e}"))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let as_json = match args.format.as_str() {
        "json" => true,
        "csv" => false,
        other => anyhow::bail!("unknown format '{other}' (expected csv or json)"),
    };

    if !as_json {
        writeln!(out, "weight,dirt")?;
    }

    for _ in 0..args.rows {
        // One-decimal resolution matches the panel slider step.
        let weight = round1(weight_dist.sample(&mut rng).clamp(INPUT_MIN, INPUT_MAX));
        let dirt = round1(dirt_dist.sample(&mut rng).clamp(INPUT_MIN, INPUT_MAX));

        if as_json {
            writeln!(out, r#"{{"weight": {weight:.1}, "dirt": {dirt:.1}}}"#)?;
        } else {
            writeln!(out, "{weight:.1},{dirt:.1}")?;
        }
    }

    Ok(())
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
