//! Rule aggregation and defuzzification.
//!
//! Three Mamdani-style rules map the fuzzified inputs onto speed bands,
//! using min as the AND operator and max as the OR operator:
//!
//! - slow   = Light AND Low
//! - medium = (Light AND High) OR (Medium AND Low)
//! - fast   = (Medium AND High) OR (Heavy AND Medium) OR (Heavy AND High)
//!
//! The rule base intentionally leaves Medium∧Medium uncovered — at the exact
//! centre of both universes nothing fires and the crisp speed degrades to 0
//! through the epsilon guard. The gap is deliberate and preserved for output
//! compatibility.

use crate::config::defaults::DEFUZZ_EPSILON;
use crate::types::{DirtLevels, RuleActivations, WeightLevels};

/// Fire the rule base against fuzzified inputs.
pub fn aggregate(weight: &WeightLevels, dirt: &DirtLevels) -> RuleActivations {
    let slow = weight.light.min(dirt.low);

    let medium = weight
        .light
        .min(dirt.high)
        .max(weight.medium.min(dirt.low));

    let fast = weight
        .medium
        .min(dirt.high)
        .max(weight.heavy.min(dirt.medium))
        .max(weight.heavy.min(dirt.high));

    RuleActivations { slow, medium, fast }
}

/// Collapse rule activations into a crisp drum speed (RPM).
///
/// Weighted average of the three output singletons:
///
/// `speed = (slow·S + medium·M + fast·F) / (slow + medium + fast + ε)`
///
/// The epsilon keeps the all-zero case well-defined: with no activation the
/// numerator is 0 and the speed degrades to 0 rather than dividing by zero.
pub fn defuzzify(activations: &RuleActivations) -> f64 {
    let out = &crate::config::get().output;

    let numerator = activations.slow * out.slow_rpm
        + activations.medium * out.medium_rpm
        + activations.fast * out.fast_rpm;
    let denominator = activations.slow + activations.medium + activations.fast + DEFUZZ_EPSILON;

    numerator / denominator
}
