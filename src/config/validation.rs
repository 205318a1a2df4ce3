//! Config validation: unknown-key detection with Levenshtein suggestions
//! and range checks on membership parameters.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " — did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for MachineConfig.
///
/// This is maintained manually to match the struct hierarchy in
/// machine_config.rs. Any new field added there must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [machine]
        "machine",
        "machine.name",
        "machine.id",
        // [server]
        "server",
        "server.addr",
        // [auth]
        "auth",
        "auth.username",
        "auth.password",
        // [membership]
        "membership",
        "membership.weight_light",
        "membership.weight_medium",
        "membership.weight_heavy",
        "membership.dirt_low",
        "membership.dirt_medium",
        "membership.dirt_high",
        // [output]
        "output",
        "output.slow_rpm",
        "output.medium_rpm",
        "output.fast_rpm",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_len = a.len();
    let b_len = b.len();
    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist <= 3 {
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((k, dist)),
            }
        }
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys — it only warns. Existing configs
/// always continue to work.
pub fn check_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    let found = walk_toml_keys(&value, "");
    let mut warnings = Vec::new();

    for key in &found {
        if !known.contains(key.as_str()) {
            let suggestion = suggest_correction(key, &known);
            let message = format!("Unknown config key '{key}'");
            warnings.push(ValidationWarning {
                field: key.clone(),
                message,
                suggestion,
            });
        }
    }

    warnings
}

// ============================================================================
// Range Validation
// ============================================================================

/// Validate membership triples and output singletons on a parsed config.
///
/// All findings are warnings: a degenerate triple produces degenerate
/// memberships, not a crash, so startup is never blocked.
pub fn check_ranges(config: &super::MachineConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let m = &config.membership;
    let triples: [(&str, [f64; 3]); 6] = [
        ("membership.weight_light", m.weight_light),
        ("membership.weight_medium", m.weight_medium),
        ("membership.weight_heavy", m.weight_heavy),
        ("membership.dirt_low", m.dirt_low),
        ("membership.dirt_medium", m.dirt_medium),
        ("membership.dirt_high", m.dirt_high),
    ];

    for (field, [a, b, c]) in triples {
        if !(a < b && b < c) {
            warnings.push(ValidationWarning {
                field: field.to_string(),
                message: format!(
                    "{field} = [{a}, {b}, {c}] is not strictly ordered (a < b < c); \
                     membership degrees will be degenerate"
                ),
                suggestion: None,
            });
        }
        if a < super::defaults::INPUT_MIN || c > super::defaults::INPUT_MAX {
            warnings.push(ValidationWarning {
                field: field.to_string(),
                message: format!(
                    "{field} = [{a}, {b}, {c}] extends outside the input universe [{}, {}]",
                    super::defaults::INPUT_MIN,
                    super::defaults::INPUT_MAX
                ),
                suggestion: None,
            });
        }
    }

    let o = &config.output;
    if o.slow_rpm <= 0.0 {
        warnings.push(ValidationWarning {
            field: "output.slow_rpm".to_string(),
            message: format!("output.slow_rpm = {:.0} must be positive", o.slow_rpm),
            suggestion: None,
        });
    }
    if !(o.slow_rpm < o.medium_rpm && o.medium_rpm < o.fast_rpm) {
        warnings.push(ValidationWarning {
            field: "output".to_string(),
            message: format!(
                "output singletons [{:.0}, {:.0}, {:.0}] are not strictly ascending",
                o.slow_rpm, o.medium_rpm, o.fast_rpm
            ),
            suggestion: None,
        });
    }

    warnings
}
