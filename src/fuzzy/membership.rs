//! Triangular membership functions for the two controller inputs.
//!
//! Both inputs share the same universe [0, 10] and the same three-label
//! layout (low / mid / high triples). Parameters come from the machine
//! config; defaults reproduce the fielded controller values.

use crate::types::{DirtLevels, WeightLevels};

/// Evaluate a triangular membership function at `x`.
///
/// Shape: 0 at and outside [a, c], linear ramp up to 1 at b, linear ramp
/// back down to 0 at c.
///
/// The peak `x == b` is classified into the ramp-up branch (`a < x <= b`).
/// Output compatibility depends on this boundary choice, so the `<=` stays
/// exactly as is.
pub fn triangular(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x <= a || x >= c {
        0.0
    } else if x <= b {
        (x - a) / (b - a)
    } else {
        (c - x) / (c - b)
    }
}

/// Fuzzify a load weight (kg, 0-10) into Light / Medium / Heavy degrees.
pub fn weight_membership(w: f64) -> WeightLevels {
    let m = &crate::config::get().membership;
    let [la, lb, lc] = m.weight_light;
    let [ma, mb, mc] = m.weight_medium;
    let [ha, hb, hc] = m.weight_heavy;

    WeightLevels {
        light: triangular(w, la, lb, lc),
        medium: triangular(w, ma, mb, mc),
        heavy: triangular(w, ha, hb, hc),
    }
}

/// Fuzzify a dirt level (0-10) into Low / Medium / High degrees.
pub fn dirt_membership(d: f64) -> DirtLevels {
    let m = &crate::config::get().membership;
    let [la, lb, lc] = m.dirt_low;
    let [ma, mb, mc] = m.dirt_medium;
    let [ha, hb, hc] = m.dirt_high;

    DirtLevels {
        low: triangular(d, la, lb, lc),
        medium: triangular(d, ma, mb, mc),
        high: triangular(d, ha, hb, hc),
    }
}
