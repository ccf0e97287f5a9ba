//! Threshold resolution for the binary.
//!
//! Later sources win:
//! 1. built-in defaults
//! 2. JSON file: `--config`, else `FIELDSENSE_CONFIG`, else
//!    `<config_dir>/fieldsense/config.json` (skipped when absent)
//! 3. `FIELDSENSE_FIELD_THRESHOLD`, `FIELDSENSE_FORM_THRESHOLD`,
//!    `FIELDSENSE_OTP_THRESHOLD`
//! 4. `--field-threshold`, `--form-threshold`, `--otp-threshold`
//!
//! The environment is passed in as a map so tests never touch process state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fieldsense_core::Thresholds;

pub const CONFIG_ENV: &str = "FIELDSENSE_CONFIG";
pub const FIELD_THRESHOLD_ENV: &str = "FIELDSENSE_FIELD_THRESHOLD";
pub const FORM_THRESHOLD_ENV: &str = "FIELDSENSE_FORM_THRESHOLD";
pub const OTP_THRESHOLD_ENV: &str = "FIELDSENSE_OTP_THRESHOLD";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid threshold: {0}")]
    Invalid(#[from] fieldsense_core::ApiError),
}

/// Threshold values given on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlagOverrides {
    pub field: Option<f32>,
    pub form: Option<f32>,
    pub otp: Option<f32>,
}

/// Where the config file was looked for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigPath {
    /// Named by flag or env var; must exist.
    Explicit(PathBuf),
    /// Per-user default; may be missing.
    Default(PathBuf),
}

fn config_path(flag: Option<&Path>, env: &HashMap<String, String>) -> Option<ConfigPath> {
    if let Some(path) = flag {
        return Some(ConfigPath::Explicit(path.to_path_buf()));
    }

    if let Some(path) = env.get(CONFIG_ENV) {
        if !path.is_empty() {
            return Some(ConfigPath::Explicit(PathBuf::from(path)));
        }
    }

    dirs::config_dir().map(|dir| ConfigPath::Default(dir.join("fieldsense").join("config.json")))
}

fn read_file(path: &Path) -> Result<Thresholds, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn load_file(path: Option<ConfigPath>) -> Result<Thresholds, ConfigError> {
    match path {
        Some(ConfigPath::Explicit(path)) => {
            tracing::debug!(path = %path.display(), "loading config");
            read_file(&path)
        }
        Some(ConfigPath::Default(path)) if path.exists() => {
            tracing::debug!(path = %path.display(), "loading default config");
            read_file(&path)
        }
        _ => Ok(Thresholds::default()),
    }
}

fn env_threshold(env: &HashMap<String, String>, key: &str) -> Option<f32> {
    let raw = env.get(key)?;
    match raw.trim().parse::<f32>() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}

fn apply_env_overrides(mut thresholds: Thresholds, env: &HashMap<String, String>) -> Thresholds {
    if let Some(value) = env_threshold(env, FIELD_THRESHOLD_ENV) {
        thresholds = thresholds.with_field_threshold(value);
    }
    if let Some(value) = env_threshold(env, FORM_THRESHOLD_ENV) {
        thresholds = thresholds.with_form_threshold(value);
    }
    if let Some(value) = env_threshold(env, OTP_THRESHOLD_ENV) {
        thresholds = thresholds.with_otp_threshold(value);
    }
    thresholds
}

fn apply_flag_overrides(mut thresholds: Thresholds, flags: FlagOverrides) -> Thresholds {
    if let Some(value) = flags.field {
        thresholds = thresholds.with_field_threshold(value);
    }
    if let Some(value) = flags.form {
        thresholds = thresholds.with_form_threshold(value);
    }
    if let Some(value) = flags.otp {
        thresholds = thresholds.with_otp_threshold(value);
    }
    thresholds
}

/// Merge every source and validate the result.
pub fn resolve(
    config_flag: Option<&Path>,
    env: &HashMap<String, String>,
    flags: FlagOverrides,
) -> Result<Thresholds, ConfigError> {
    let thresholds = load_file(config_path(config_flag, env))?;
    let thresholds = apply_env_overrides(thresholds, env);
    let thresholds = apply_flag_overrides(thresholds, flags);
    thresholds.validate()?;
    tracing::debug!(?thresholds, "resolved thresholds");
    Ok(thresholds)
}
