//! Shared data structures for the wash-cycle decision pipeline
//!
//! This module defines the core types flowing through the service:
//! - `WeightLevels` / `DirtLevels` — fuzzified input memberships
//! - `RuleActivations` — firing strength of the three speed rules
//! - `WashDecision` — crisp speed plus activations and explanation
//! - `DecisionRecord` — timestamped decision kept in the recent ring

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Speed Band (decision lean)
// ============================================================================

/// Which speed band the decision leans towards.
///
/// Derived from the rule activations: fast dominating medium leans Fast,
/// medium dominating slow leans Medium, otherwise Slow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
pub enum SpeedBand {
    #[default]
    Slow,
    Medium,
    Fast,
}

impl SpeedBand {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SpeedBand::Slow => "Slow",
            SpeedBand::Medium => "Medium",
            SpeedBand::Fast => "Fast",
        }
    }

    /// Get short code for logging
    pub fn short_code(&self) -> &'static str {
        match self {
            SpeedBand::Slow => "SLOW",
            SpeedBand::Medium => "MED",
            SpeedBand::Fast => "FAST",
        }
    }

    /// One-line operator advisory shown next to the decision
    pub fn advisory(&self) -> &'static str {
        match self {
            SpeedBand::Fast => "Decision leans towards FAST wash due to heavy load or high dirt.",
            SpeedBand::Medium => "Decision leans towards MEDIUM wash for balanced conditions.",
            SpeedBand::Slow => "Decision leans towards SLOW wash for light or delicate clothes.",
        }
    }
}

impl std::fmt::Display for SpeedBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Fuzzified Inputs
// ============================================================================

/// Membership degrees of the load weight input, one per linguistic label.
///
/// Each degree is in [0, 1]. The three labels overlap, so degrees do not
/// need to sum to 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct WeightLevels {
    pub light: f64,
    pub medium: f64,
    pub heavy: f64,
}

/// Membership degrees of the dirt level input, one per linguistic label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct DirtLevels {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

// ============================================================================
// Rule Activations
// ============================================================================

/// Firing strength of the three speed rules, each in [0, 1].
///
/// Computed from the input memberships with min for AND and max for OR.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct RuleActivations {
    pub slow: f64,
    pub medium: f64,
    pub fast: f64,
}

impl RuleActivations {
    /// Which band the activations lean towards.
    ///
    /// Fast wins a strict comparison over medium, medium over slow; all-equal
    /// (including all-zero) falls through to Slow. The advisory text shown on
    /// the panel follows this ordering.
    pub fn lean(&self) -> SpeedBand {
        if self.fast > self.medium {
            SpeedBand::Fast
        } else if self.medium > self.slow {
            SpeedBand::Medium
        } else {
            SpeedBand::Slow
        }
    }
}

// ============================================================================
// Wash Decision
// ============================================================================

/// Crisp output of one inference call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WashDecision {
    /// Recommended drum speed in RPM. Nominally in [400, 1200]; degrades
    /// towards 0 when no rule fires (epsilon-guarded denominator).
    pub speed_rpm: f64,
    /// Rule firing strengths behind the speed.
    pub activations: RuleActivations,
    /// Band the decision leans towards.
    pub lean: SpeedBand,
    /// Fixed three-line activation report.
    pub explanation: String,
}

/// A decision together with the inputs that produced it and when.
///
/// Kept in the in-memory recent ring for the dashboard; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub timestamp: DateTime<Utc>,
    pub weight: f64,
    pub dirt: f64,
    pub decision: WashDecision,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lean_prefers_fast_over_medium() {
        let acts = RuleActivations {
            slow: 0.1,
            medium: 0.4,
            fast: 0.5,
        };
        assert_eq!(acts.lean(), SpeedBand::Fast);
    }

    #[test]
    fn test_lean_medium_for_balanced_conditions() {
        let acts = RuleActivations {
            slow: 0.2,
            medium: 0.6,
            fast: 0.3,
        };
        assert_eq!(acts.lean(), SpeedBand::Medium);
    }

    #[test]
    fn test_lean_defaults_to_slow_when_nothing_fires() {
        let acts = RuleActivations::default();
        assert_eq!(acts.lean(), SpeedBand::Slow);
    }

    #[test]
    fn test_speed_band_display() {
        assert_eq!(SpeedBand::Fast.to_string(), "Fast");
        assert_eq!(SpeedBand::Medium.short_code(), "MED");
    }
}
