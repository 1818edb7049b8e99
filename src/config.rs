use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::types::DEFAULT_TOLERANCE;

/// Built-in defaults plus their TOML override file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Entrywise comparison tolerance for verification.
    pub tolerance: f64,
    /// Upper end of the qubit range swept by `verify`.
    pub max_verify_qubits: usize,
    /// Measurement count when `--shots` is requested without a value.
    pub default_shots: usize,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_verify_qubits: 4,
            default_shots: 1024,
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    // ~\Users\you\.groverlab\config.toml on Windows; ~/.groverlab/config.toml elsewhere
    dirs_next::home_dir().map(|h| h.join(".groverlab").join("config.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}

/// Load the config; a missing file yields the defaults, unparseable or
/// nonsensical TOML is an error.
pub fn load_config(path: Option<&Path>) -> Result<LabConfig> {
    let path = match path {
        Some(p) if p.exists() => p,
        _ => return Ok(LabConfig::default()),
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Read config {}", path.display()))?;
    let cfg: LabConfig =
        toml::from_str(&raw).with_context(|| format!("Parse config {}", path.display()))?;
    if cfg.tolerance <= 0.0 || !cfg.tolerance.is_finite() {
        bail!("config {}: tolerance must be a positive number", path.display());
    }
    Ok(cfg)
}
