use crate::config::Config;
use crate::config::migrate::{migrate_config_file, missing_keys};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(path: &Path) -> AppResult<()> {
        if !path.exists() {
            warning(format!(
                "{} does not exist, showing defaults. Run `rtriplog init` to create it.",
                path.display()
            ));
            let yaml = serde_yaml::to_string(&Config::default()).map_err(|_| AppError::ConfigSave)?;
            println!("{}", yaml);
            return Ok(());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        println!("{}", content);
        Ok(())
    }

    /// Report keys missing from the file and whether it loads and validates.
    /// Returns the missing keys.
    pub fn check(path: &Path) -> AppResult<Vec<String>> {
        let missing = missing_keys(path)?;
        if missing.is_empty() {
            success(format!("{}: no missing keys.", path.display()));
        } else {
            warning(format!("{}: {} missing key(s):", path.display(), missing.len()));
            for k in &missing {
                println!("   - {}", k);
            }
            info("Run `rtriplog config --migrate` to add them with default values.");
        }

        let cfg = Config::load_from(path)?;
        cfg.generation.validate()?;
        success("Configuration is valid.");
        Ok(missing)
    }

    pub fn migrate(path: &Path) -> AppResult<usize> {
        migrate_config_file(path)
    }

    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let ed = editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .unwrap_or_else(|| {
                if cfg!(target_os = "windows") {
                    "notepad".into()
                } else {
                    "nano".into()
                }
            });

        Command::new(ed)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(())
    }
}
