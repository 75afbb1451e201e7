use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Read a YAML file into a mapping. A missing or empty file is an empty mapping.
fn read_mapping(path: &Path) -> AppResult<Mapping> {
    if !path.exists() {
        return Ok(Mapping::new());
    }

    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(&content) {
        Ok(Value::Mapping(map)) => Ok(map),
        Ok(_) => Err(AppError::Config(format!(
            "{} does not contain a YAML mapping",
            path.display()
        ))),
        Err(e) => Err(AppError::Config(format!("{}: {}", path.display(), e))),
    }
}

fn defaults_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default()) {
        Ok(Value::Mapping(map)) => Ok(map),
        _ => Err(AppError::ConfigSave),
    }
}

/// Collect dotted paths present in `defaults` but missing from `current`.
/// Lists (e.g. `generation.secondary`) are compared as a whole.
fn collect_missing(defaults: &Mapping, current: &Mapping, prefix: &str, out: &mut Vec<String>) {
    for (key, default_val) in defaults {
        let Some(name) = key.as_str() else { continue };
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };

        match (default_val, current.get(key)) {
            (_, None) => out.push(path),
            (Value::Mapping(d), Some(Value::Mapping(c))) => collect_missing(d, c, &path, out),
            _ => {}
        }
    }
}

/// Fill keys missing from `current` with their defaults. Returns how many
/// keys were added.
fn fill_missing(defaults: &Mapping, current: &mut Mapping) -> usize {
    let mut added = 0;
    for (key, default_val) in defaults {
        match current.get_mut(key) {
            None => {
                current.insert(key.clone(), default_val.clone());
                added += 1;
            }
            Some(Value::Mapping(c)) => {
                if let Value::Mapping(d) = default_val {
                    added += fill_missing(d, c);
                }
            }
            Some(_) => {}
        }
    }
    added
}

/// List configuration keys missing from the file at `path`.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let defaults = defaults_mapping()?;
    let current = read_mapping(path)?;

    let mut out = Vec::new();
    collect_missing(&defaults, &current, "", &mut out);
    Ok(out)
}

/// Add missing keys (with default values) to the configuration file,
/// keeping every value already present. Returns the number of keys added.
pub fn migrate_config_file(path: &Path) -> AppResult<usize> {
    let defaults = defaults_mapping()?;
    let mut current = read_mapping(path)?;

    let added = fill_missing(&defaults, &mut current);
    if added == 0 {
        info(format!("Configuration {} is up to date.", path.display()));
        return Ok(0);
    }

    // the merged document must still load as a Config
    let merged = Value::Mapping(current);
    serde_yaml::from_value::<Config>(merged.clone())
        .map_err(|e| AppError::Config(format!("merged configuration is invalid: {e}")))?;

    let serialized = serde_yaml::to_string(&merged).map_err(|_| AppError::ConfigSave)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serialized)?;

    success(format!(
        "Configuration migrated: {} missing key(s) added to {}",
        added,
        path.display()
    ));
    Ok(added)
}
