//! System-wide default constants.
//!
//! Centralises magic numbers so they live in one discoverable place.
//! Grouped by subsystem.

// ============================================================================
// Inference
// ============================================================================

/// Epsilon added to the defuzzification denominator.
///
/// Guards the all-rules-silent case (e.g. both inputs at the exact centre of
/// the universe) against division by zero. The magnitude is part of the
/// output contract and must not change.
pub const DEFUZZ_EPSILON: f64 = 1e-6;

/// Declared input universe for both weight and dirt.
pub const INPUT_MIN: f64 = 0.0;
pub const INPUT_MAX: f64 = 10.0;

// ============================================================================
// State
// ============================================================================

/// Capacity of the recent-decision ring shown on the dashboard.
pub const RECENT_DECISIONS_CAP: usize = 100;

// ============================================================================
// Batch
// ============================================================================

/// Column header appended to batch output rows.
pub const BATCH_OUTPUT_COLUMN: &str = "Wash Speed (RPM)";

// ============================================================================
// Sessions
// ============================================================================

/// Length of the alphanumeric bearer tokens issued at login.
pub const SESSION_TOKEN_LEN: usize = 32;
