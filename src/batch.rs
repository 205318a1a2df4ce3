//! CSV batch processing.
//!
//! Takes a two-column tabular input (`weight`, `dirt` headers, any column
//! order, extra columns tolerated), runs the inference core once per row and
//! appends a `Wash Speed (RPM)` column rounded to two decimals. Output rows
//! keep the input order.
//!
//! All error handling lives here, at the boundary — the core itself is total
//! and has no failure modes.

use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::defaults::BATCH_OUTPUT_COLUMN;
use crate::fuzzy;
use crate::types::WashDecision;

/// Errors raised while parsing or processing a batch input.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("input has no rows")]
    Empty,

    #[error("missing required column '{0}' in header")]
    MissingColumn(&'static str),

    #[error("row {row}: column '{column}' value '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: expected {expected} fields, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One parsed input row: the raw fields plus the two inputs.
#[derive(Debug, Clone)]
pub struct BatchRow {
    pub weight: f64,
    pub dirt: f64,
    /// All fields as read, preserved for pass-through output.
    pub fields: Vec<String>,
}

/// A parsed batch input: header plus rows, in input order.
#[derive(Debug, Clone)]
pub struct BatchInput {
    pub header: Vec<String>,
    pub rows: Vec<BatchRow>,
}

/// A processed batch: input rows paired with their decisions, in input order.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub input: BatchInput,
    pub decisions: Vec<WashDecision>,
}

/// Round a speed to two decimals for the output column.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Split one CSV line into trimmed fields.
///
/// Inputs are plain machine-generated CSV; quoting is not part of the
/// format.
fn split_line(line: &str) -> Vec<String> {
    line.split(',').map(|f| f.trim().to_string()).collect()
}

/// Locate a required column by case-insensitive header match.
fn find_column(header: &[String], name: &'static str) -> Result<usize, BatchError> {
    header
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or(BatchError::MissingColumn(name))
}

/// Parse CSV text into a batch input.
///
/// The first non-empty line is the header and must contain `weight` and
/// `dirt` columns. Blank lines are skipped; row numbers in errors refer to
/// 1-based data rows.
pub fn parse_rows(csv: &str) -> Result<BatchInput, BatchError> {
    let mut lines = csv.lines().filter(|l| !l.trim().is_empty());

    let header = match lines.next() {
        Some(line) => split_line(line),
        None => return Err(BatchError::Empty),
    };
    let weight_idx = find_column(&header, "weight")?;
    let dirt_idx = find_column(&header, "dirt")?;

    let mut rows = Vec::new();
    for (i, line) in lines.enumerate() {
        let row_no = i + 1;
        let fields = split_line(line);
        if fields.len() != header.len() {
            return Err(BatchError::RaggedRow {
                row: row_no,
                expected: header.len(),
                found: fields.len(),
            });
        }

        let parse = |idx: usize, column: &str| -> Result<f64, BatchError> {
            fields[idx]
                .parse::<f64>()
                .map_err(|_| BatchError::InvalidNumber {
                    row: row_no,
                    column: column.to_string(),
                    value: fields[idx].clone(),
                })
        };

        rows.push(BatchRow {
            weight: parse(weight_idx, "weight")?,
            dirt: parse(dirt_idx, "dirt")?,
            fields,
        });
    }

    if rows.is_empty() {
        return Err(BatchError::Empty);
    }

    Ok(BatchInput { header, rows })
}

/// Run the inference core over every row, preserving input order.
pub fn process(input: BatchInput) -> BatchOutcome {
    let decisions = input
        .rows
        .iter()
        .map(|row| fuzzy::compute(row.weight, row.dirt))
        .collect();

    BatchOutcome { input, decisions }
}

/// Render a processed batch back to CSV with the speed column appended.
pub fn render_csv(outcome: &BatchOutcome) -> String {
    let mut out = String::new();

    out.push_str(&outcome.input.header.join(","));
    out.push(',');
    out.push_str(BATCH_OUTPUT_COLUMN);
    out.push('\n');

    for (row, decision) in outcome.input.rows.iter().zip(&outcome.decisions) {
        out.push_str(&row.fields.join(","));
        out.push_str(&format!(",{:.2}\n", round2(decision.speed_rpm)));
    }

    out
}

/// Convenience: parse, process and render in one call.
pub fn process_csv(csv: &str) -> Result<String, BatchError> {
    let input = parse_rows(csv)?;
    let outcome = process(input);
    Ok(render_csv(&outcome))
}

/// File-to-file batch conversion for the `csv-batch` CLI.
///
/// Returns the number of processed rows.
pub fn process_file(input: &Path, output: &Path) -> Result<usize, BatchError> {
    let csv = std::fs::read_to_string(input)?;
    let parsed = parse_rows(&csv)?;
    let row_count = parsed.rows.len();
    let outcome = process(parsed);

    let file = std::fs::File::create(output)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(render_csv(&outcome).as_bytes())?;
    writer.flush()?;

    tracing::info!(
        rows = row_count,
        output = %output.display(),
        "Batch conversion complete"
    );
    Ok(row_count)
}
