use crate::config::Config;
use crate::config::migrate::{migrate_file, missing_keys};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Print the effective configuration (file values plus defaults and
    /// command-line overrides).
    pub fn print(cfg: &Config) -> AppResult<()> {
        println!("📄 Current configuration:\n");
        println!("{}", cfg.to_yaml()?);
        Ok(())
    }

    fn default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }

    /// Open the config file in `editor`, falling back to `$EDITOR`/`$VISUAL`.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let fallback = Self::default_editor();
        let requested = editor.map(str::to_string).unwrap_or_else(|| fallback.clone());

        match Command::new(&requested).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration edited with '{}'", requested));
                return Ok(());
            }
            _ if requested == fallback => {
                return Err(AppError::Config(format!(
                    "could not run editor '{}'",
                    requested
                )));
            }
            _ => warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                requested, fallback
            )),
        }

        match Command::new(&fallback).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration edited with '{}'", fallback));
                Ok(())
            }
            _ => Err(AppError::Config(format!(
                "could not run editor '{}'",
                fallback
            ))),
        }
    }

    /// Report keys missing from the config file. Returns `true` when complete.
    pub fn check(path: &Path) -> AppResult<bool> {
        if !path.exists() {
            warning(format!(
                "No configuration file at {} (run `routinely init`)",
                path.display()
            ));
            return Ok(false);
        }

        let missing = missing_keys(path)?;
        if missing.is_empty() {
            success("Configuration file is complete.");
            Ok(true)
        } else {
            warning(format!(
                "Missing keys: {} (run `routinely config --migrate`)",
                missing.join(", ")
            ));
            Ok(false)
        }
    }

    pub fn migrate(path: &Path) -> AppResult<bool> {
        if !path.exists() {
            return Err(AppError::ConfigLoad);
        }
        migrate_file(path)
    }
}
