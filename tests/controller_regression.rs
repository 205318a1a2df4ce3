//! Controller Regression Tests
//!
//! Canonical numeric fixtures for the inference core, derived by hand from
//! the membership layout and rule base. These values are the output
//! contract — any change here is a behavioural break, not a refactor.

use washsense::config::{self, MachineConfig};
use washsense::fuzzy::{self, triangular};
use washsense::types::SpeedBand;

fn ensure_config() {
    if !config::is_initialized() {
        config::init(MachineConfig::default());
    }
}

// ============================================================================
// Membership Fixtures
// ============================================================================

#[test]
fn test_triangular_canonical_points() {
    assert_eq!(triangular(5.0, 0.0, 2.0, 4.0), 0.0);
    assert_eq!(triangular(1.0, 0.0, 2.0, 4.0), 0.5);
    assert_eq!(triangular(3.0, 3.0, 5.0, 7.0), 0.0);
    assert_eq!(triangular(5.0, 3.0, 5.0, 7.0), 1.0);
}

#[test]
fn test_membership_sums_in_overlap_regions() {
    ensure_config();
    // In the 3..4 overlap between Light and Medium both labels ramp linearly;
    // each degree stays in [0, 1] on its own.
    for i in 0..=10 {
        let w = 3.0 + f64::from(i) * 0.1;
        let levels = fuzzy::weight_membership(w);
        for degree in [levels.light, levels.medium, levels.heavy] {
            assert!((0.0..=1.0).contains(&degree), "w={w} degree={degree}");
        }
    }
}

// ============================================================================
// Decision Fixtures
// ============================================================================

#[test]
fn test_light_low_corner_decision() {
    ensure_config();
    let decision = fuzzy::compute(2.0, 2.0);
    assert_eq!(decision.activations.slow, 1.0);
    assert_eq!(decision.activations.medium, 0.0);
    assert_eq!(decision.activations.fast, 0.0);
    // 400 / (1 + 1e-6)
    assert!((decision.speed_rpm - 399.9996).abs() < 1e-3);
    assert_eq!(decision.lean, SpeedBand::Slow);
}

#[test]
fn test_heavy_high_corner_decision() {
    ensure_config();
    let decision = fuzzy::compute(8.0, 8.0);
    assert_eq!(decision.activations.fast, 1.0);
    assert!((decision.speed_rpm - 1199.9988).abs() < 1e-3);
    assert_eq!(decision.lean, SpeedBand::Fast);
}

#[test]
fn test_centre_of_universe_has_no_firing_rule() {
    ensure_config();
    // Medium weight = 1.0, Medium dirt = 1.0 — but no rule covers
    // Medium∧Medium, so every activation is 0 and the epsilon keeps the
    // division clean.
    let decision = fuzzy::compute(5.0, 5.0);
    assert_eq!(decision.activations.slow, 0.0);
    assert_eq!(decision.activations.medium, 0.0);
    assert_eq!(decision.activations.fast, 0.0);
    assert_eq!(decision.speed_rpm, 0.0);
}

#[test]
fn test_mixed_region_decision() {
    ensure_config();
    // (3.5, 3.5): Light = Medium = 0.25 on both axes.
    // slow = 0.25, medium = 0.25, fast = 0 → 300 / 0.500001 ≈ 600
    let decision = fuzzy::compute(3.5, 3.5);
    assert_eq!(decision.activations.slow, 0.25);
    assert_eq!(decision.activations.medium, 0.25);
    assert_eq!(decision.activations.fast, 0.0);
    assert!((decision.speed_rpm - 600.0).abs() < 0.01);
}

#[test]
fn test_boundary_inputs_never_divide_by_zero() {
    ensure_config();
    for (w, d) in [(0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0)] {
        let decision = fuzzy::compute(w, d);
        assert!(decision.speed_rpm.is_finite(), "({w}, {d})");
        assert_eq!(decision.speed_rpm, 0.0, "({w}, {d})");
    }
}

#[test]
fn test_compute_is_pure() {
    ensure_config();
    for (w, d) in [(1.2, 9.7), (4.4, 4.4), (7.1, 0.3)] {
        assert_eq!(fuzzy::compute(w, d), fuzzy::compute(w, d));
    }
}

#[test]
fn test_diagonal_speeds_non_decreasing() {
    ensure_config();
    let speeds: Vec<f64> = [(2.0, 2.0), (3.5, 3.5), (6.5, 6.5), (8.0, 8.0)]
        .iter()
        .map(|&(w, d)| fuzzy::compute(w, d).speed_rpm)
        .collect();
    assert!(
        speeds.windows(2).all(|pair| pair[0] <= pair[1]),
        "speeds along diagonal: {speeds:?}"
    );
}

// ============================================================================
// Explanation Contract
// ============================================================================

#[test]
fn test_explanation_format_is_fixed() {
    ensure_config();
    let decision = fuzzy::compute(2.0, 2.0);
    assert_eq!(
        decision.explanation,
        "Light AND Low = 1.00\nMedium rules = 0.00\nHeavy rules = 0.00"
    );

    let lines: Vec<&str> = decision.explanation.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Light AND Low = "));
    assert!(lines[1].starts_with("Medium rules = "));
    assert!(lines[2].starts_with("Heavy rules = "));
}
