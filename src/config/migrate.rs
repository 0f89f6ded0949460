//! Configuration file checks and upgrades.
//!
//! Older config files may lack keys added in later releases. `check` lists
//! them, `migrate` rewrites the file with every missing key set to its
//! default while leaving existing values alone.

use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys every up-to-date config file carries.
pub const EXPECTED_KEYS: [&str; 5] = [
    "database",
    "default_user",
    "bind",
    "grace_minutes",
    "log_level",
];

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

    match yaml {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{}: top-level value must be a mapping",
            path.display()
        ))),
    }
}

/// Return the expected keys absent from the config file at `path`.
pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;
    Ok(EXPECTED_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(*k))
        .collect())
}

/// Add missing keys (with defaults) to the config file at `path`.
///
/// Returns `Ok(true)` when the file was rewritten.
pub fn migrate_file(path: &Path) -> AppResult<bool> {
    let missing = missing_keys(path)?;
    if missing.is_empty() {
        info("Configuration is up to date.");
        return Ok(false);
    }

    let mut map = read_mapping(path)?;
    let defaults = serde_yaml::to_value(Config::default())
        .map_err(|e| AppError::Config(e.to_string()))?;

    if let Value::Mapping(defaults) = defaults {
        for key in &missing {
            if let Some(v) = defaults.get(*key) {
                map.insert(Value::String((*key).to_string()), v.clone());
            }
        }
    }

    let serialized =
        serde_yaml::to_string(&Value::Mapping(map)).map_err(|_| AppError::ConfigSave)?;
    fs::write(path, serialized).map_err(|_| AppError::ConfigSave)?;

    success(format!("Added missing config keys: {}", missing.join(", ")));
    Ok(true)
}
