//! Machine Configuration - All controller constants as operator-tunable TOML values
//!
//! Every constant that was previously hardcoded is a field in this module.
//! Each struct implements `Default` with the previously hardcoded values,
//! ensuring zero-change behavior when no config file is present.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a machine deployment.
///
/// Load with `MachineConfig::load()` which searches:
/// 1. `$WASHSENSE_CONFIG` env var
/// 2. `./washsense.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Machine identification
    #[serde(default)]
    pub machine: MachineInfo,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Access gate credentials
    #[serde(default)]
    pub auth: AuthConfig,

    /// Triangular membership function parameters
    #[serde(default)]
    pub membership: MembershipConfig,

    /// Output speed singletons
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            machine: MachineInfo::default(),
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            membership: MembershipConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

// ============================================================================
// Machine Identification
// ============================================================================

/// Machine / drum identification used in logs and reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineInfo {
    /// Display name of the machine
    #[serde(default = "default_machine_name")]
    pub name: String,

    /// Short identifier used in logs and API responses
    #[serde(default = "default_machine_id")]
    pub id: String,
}

fn default_machine_name() -> String {
    "Fuzzy Washing Machine".to_string()
}

fn default_machine_id() -> String {
    "DRUM-1".to_string()
}

impl Default for MachineInfo {
    fn default() -> Self {
        Self {
            name: default_machine_name(),
            id: default_machine_id(),
        }
    }
}

// ============================================================================
// Server
// ============================================================================

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP server
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

// ============================================================================
// Access Gate
// ============================================================================

/// Credentials for the access gate.
///
/// This is a convenience gate, not a security boundary — credentials are
/// stored and compared in plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "admin123".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
        }
    }
}

// ============================================================================
// Membership Functions
// ============================================================================

/// Triangular membership parameters `[a, b, c]` per linguistic label.
///
/// Each triple must satisfy a < b < c; validation warns otherwise. Defaults
/// are the fielded controller values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipConfig {
    #[serde(default = "default_low_triple")]
    pub weight_light: [f64; 3],

    #[serde(default = "default_mid_triple")]
    pub weight_medium: [f64; 3],

    #[serde(default = "default_high_triple")]
    pub weight_heavy: [f64; 3],

    #[serde(default = "default_low_triple")]
    pub dirt_low: [f64; 3],

    #[serde(default = "default_mid_triple")]
    pub dirt_medium: [f64; 3],

    #[serde(default = "default_high_triple")]
    pub dirt_high: [f64; 3],
}

fn default_low_triple() -> [f64; 3] {
    [0.0, 2.0, 4.0]
}

fn default_mid_triple() -> [f64; 3] {
    [3.0, 5.0, 7.0]
}

fn default_high_triple() -> [f64; 3] {
    [6.0, 8.0, 10.0]
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            weight_light: default_low_triple(),
            weight_medium: default_mid_triple(),
            weight_heavy: default_high_triple(),
            dirt_low: default_low_triple(),
            dirt_medium: default_mid_triple(),
            dirt_high: default_high_triple(),
        }
    }
}

// ============================================================================
// Output Singletons
// ============================================================================

/// Crisp output speeds (RPM) weighted by rule activation during
/// defuzzification. Must be positive and strictly ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_slow_rpm")]
    pub slow_rpm: f64,

    #[serde(default = "default_medium_rpm")]
    pub medium_rpm: f64,

    #[serde(default = "default_fast_rpm")]
    pub fast_rpm: f64,
}

fn default_slow_rpm() -> f64 {
    400.0
}

fn default_medium_rpm() -> f64 {
    800.0
}

fn default_fast_rpm() -> f64 {
    1200.0
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            slow_rpm: default_slow_rpm(),
            medium_rpm: default_medium_rpm(),
            fast_rpm: default_fast_rpm(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl MachineConfig {
    /// Load configuration using the standard search order:
    /// 1. `$WASHSENSE_CONFIG` environment variable
    /// 2. `./washsense.toml` in the current working directory
    /// 3. Built-in defaults (previously hardcoded values)
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var("WASHSENSE_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), machine = %config.machine.id, "Loaded machine config from WASHSENSE_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from WASHSENSE_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "WASHSENSE_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./washsense.toml
        let local = PathBuf::from("washsense.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(machine = %config.machine.id, "Loaded machine config from ./washsense.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./washsense.toml, using defaults");
                }
            }
        }

        // 3. Built-in defaults
        info!("No config file found, using built-in defaults");
        Self::default()
    }

    /// Load and parse a TOML config file, emitting validation warnings.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse a TOML string, emitting validation warnings via tracing.
    ///
    /// Warnings (unknown keys, out-of-range values) never fail the load —
    /// typos should not brick a machine at startup.
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        for warning in super::validation::check_unknown_keys(contents) {
            warn!(field = %warning.field, "{warning}");
        }

        let config: Self = toml::from_str(contents)?;

        for warning in super::validation::check_ranges(&config) {
            warn!(field = %warning.field, "{warning}");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fielded_constants() {
        let config = MachineConfig::default();
        assert_eq!(config.membership.weight_light, [0.0, 2.0, 4.0]);
        assert_eq!(config.membership.weight_medium, [3.0, 5.0, 7.0]);
        assert_eq!(config.membership.weight_heavy, [6.0, 8.0, 10.0]);
        assert_eq!(config.membership.dirt_low, [0.0, 2.0, 4.0]);
        assert_eq!(config.output.slow_rpm, 400.0);
        assert_eq!(config.output.medium_rpm, 800.0);
        assert_eq!(config.output.fast_rpm, 1200.0);
        assert_eq!(config.auth.username, "admin");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = MachineConfig::from_toml_str(
            r#"
            [machine]
            id = "DRUM-7"

            [output]
            fast_rpm = 1400.0
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(config.machine.id, "DRUM-7");
        assert_eq!(config.output.fast_rpm, 1400.0);
        // Untouched sections keep default values
        assert_eq!(config.output.slow_rpm, 400.0);
        assert_eq!(config.membership.weight_light, [0.0, 2.0, 4.0]);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(MachineConfig::from_toml_str("not [ valid").is_err());
    }
}
