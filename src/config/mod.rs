//! Machine Configuration Module
//!
//! Provides per-machine configuration loaded from TOML files, replacing all
//! hardcoded controller constants with operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `WASHSENSE_CONFIG` environment variable (path to TOML file)
//! 2. `washsense.toml` in the current working directory
//! 3. Built-in defaults (previously hardcoded values)
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! // In main():
//! config::init(MachineConfig::load());
//!
//! // Anywhere in the codebase:
//! let triple = config::get().membership.weight_light;
//! ```

mod machine_config;
pub mod defaults;
pub mod validation;

pub use machine_config::*;

use std::sync::OnceLock;

/// Global machine configuration, initialized once at startup.
static MACHINE_CONFIG: OnceLock<MachineConfig> = OnceLock::new();

/// Initialize the global machine configuration.
///
/// Must be called exactly once before any calls to `get()`.
pub fn init(config: MachineConfig) {
    if MACHINE_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once — ignoring");
    }
}

/// Get a reference to the global machine configuration.
///
/// Panics if `init()` has not been called. This is by design — a missing
/// config is a fatal startup error, not a recoverable condition.
pub fn get() -> &'static MachineConfig {
    MACHINE_CONFIG
        .get()
        .expect("config::get() called before config::init() — this is a startup bug")
}

/// Check whether the config has been initialized.
///
/// Useful for tests and optional config paths.
pub fn is_initialized() -> bool {
    MACHINE_CONFIG.get().is_some()
}
