//! Fuzzy Inference Module
//!
//! The decision core of washsense. Maps (load weight, dirt level) to a
//! recommended drum speed in three deterministic steps, all pure math:
//!
//! - `membership` — triangular fuzzification of both inputs
//! - `rules` — min/max rule aggregation into three activations
//! - defuzzification — weighted average over the output singletons
//!
//! There is no state, no error path and no side channel: `compute()` is
//! total over any pair of finite reals and safe to call from any number of
//! concurrent callers. Input validation belongs to the boundary (API / CSV
//! row), not here.

pub mod membership;
pub mod rules;

pub use membership::{dirt_membership, triangular, weight_membership};
pub use rules::{aggregate, defuzzify};

use crate::types::{RuleActivations, WashDecision};

/// Run the full inference chain for one input pair.
pub fn compute(weight: f64, dirt: f64) -> WashDecision {
    let weight_levels = weight_membership(weight);
    let dirt_levels = dirt_membership(dirt);

    let activations = aggregate(&weight_levels, &dirt_levels);
    let speed_rpm = defuzzify(&activations);

    WashDecision {
        speed_rpm,
        activations,
        lean: activations.lean(),
        explanation: build_explanation(&activations),
    }
}

/// Fixed three-line activation report.
///
/// Line labels and two-decimal formatting are part of the output contract;
/// report rendering and the dashboard both display this text verbatim.
pub fn build_explanation(activations: &RuleActivations) -> String {
    format!(
        "Light AND Low = {:.2}\nMedium rules = {:.2}\nHeavy rules = {:.2}",
        activations.slow, activations.medium, activations.fast
    )
}
