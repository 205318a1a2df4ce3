//! Batch Integration Tests
//!
//! End-to-end CSV conversion through `batch::process_file`, including the
//! error taxonomy callers must handle at the boundary.

use std::io::Write;

use washsense::batch::{self, BatchError};
use washsense::config::{self, MachineConfig};

fn ensure_config() {
    if !config::is_initialized() {
        config::init(MachineConfig::default());
    }
}

fn write_temp_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp csv");
    file
}

#[test]
fn test_file_round_trip_appends_column() {
    ensure_config();
    let input = write_temp_csv("weight,dirt\n2,2\n3.5,3.5\n8,8\n");
    let out_dir = tempfile::tempdir().expect("create temp dir");
    let out_path = out_dir.path().join("speeds.csv");

    let rows = batch::process_file(input.path(), &out_path).expect("conversion should succeed");
    assert_eq!(rows, 3);

    let output = std::fs::read_to_string(&out_path).expect("read output");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "weight,dirt,Wash Speed (RPM)");
    assert_eq!(lines[1], "2,2,400.00");
    assert_eq!(lines[2], "3.5,3.5,600.00");
    assert_eq!(lines[3], "8,8,1200.00");
}

#[test]
fn test_row_order_is_preserved() {
    ensure_config();
    // Deliberately unsorted inputs: output must keep the input order, not
    // any speed order.
    let out = batch::process_csv("weight,dirt\n8,8\n2,2\n6.5,6.5\n").expect("process");
    let speeds: Vec<&str> = out
        .lines()
        .skip(1)
        .map(|l| l.rsplit(',').next().unwrap())
        .collect();
    assert_eq!(speeds, ["1200.00", "400.00", "1200.00"]);
}

#[test]
fn test_diagonal_batch_is_monotone() {
    ensure_config();
    let out = batch::process_csv("weight,dirt\n2,2\n3.5,3.5\n8,8\n").expect("process");
    let speeds: Vec<f64> = out
        .lines()
        .skip(1)
        .map(|l| l.rsplit(',').next().unwrap().parse().unwrap())
        .collect();
    assert!(speeds.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_missing_file_is_io_error() {
    ensure_config();
    let out_dir = tempfile::tempdir().expect("create temp dir");
    let err = batch::process_file(
        &out_dir.path().join("missing.csv"),
        &out_dir.path().join("out.csv"),
    )
    .unwrap_err();
    assert!(matches!(err, BatchError::Io(_)));
}

#[test]
fn test_missing_column_file_error() {
    ensure_config();
    let input = write_temp_csv("weight,soil\n2,2\n");
    let out_dir = tempfile::tempdir().expect("create temp dir");
    let err = batch::process_file(input.path(), &out_dir.path().join("out.csv")).unwrap_err();
    assert!(matches!(err, BatchError::MissingColumn("dirt")));
}

#[test]
fn test_empty_input_is_rejected() {
    ensure_config();
    assert!(matches!(batch::process_csv(""), Err(BatchError::Empty)));
    assert!(matches!(
        batch::process_csv("weight,dirt\n"),
        Err(BatchError::Empty)
    ));
}

#[test]
fn test_ragged_row_is_rejected_with_row_number() {
    ensure_config();
    let err = batch::process_csv("weight,dirt\n2,2\n3\n").unwrap_err();
    match err {
        BatchError::RaggedRow { row, expected, found } => {
            assert_eq!(row, 2);
            assert_eq!(expected, 2);
            assert_eq!(found, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}
