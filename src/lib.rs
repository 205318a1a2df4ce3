//! washsense: Fuzzy Wash-Cycle Decision Service
//!
//! Decision-support service for drum speed selection. Two scalar inputs
//! (load weight, dirt level) are mapped to a recommended speed by a small
//! fuzzy-rule inference core; everything around the core is IO glue.
//!
//! ## Architecture
//!
//! - **Fuzzy Core**: triangular memberships, min/max rule aggregation,
//!   weighted-average defuzzification (pure functions, no state)
//! - **Batch Layer**: CSV in, CSV out, one inference call per row
//! - **Report Layer**: fixed-layout single-page PDF export
//! - **API Layer**: axum endpoints plus an embedded dashboard, behind a
//!   token-session access gate

pub mod api;
pub mod auth;
pub mod batch;
pub mod config;
pub mod fuzzy;
pub mod report;
pub mod state;
pub mod types;

// Re-export machine configuration
pub use config::MachineConfig;

// Re-export commonly used types
pub use types::{
    DecisionRecord, DirtLevels, RuleActivations, SpeedBand, WashDecision, WeightLevels,
};

// Re-export the inference entry point
pub use fuzzy::compute;

// Re-export gate components
pub use auth::{CredentialVerifier, SessionStore, StaticCredentials};
