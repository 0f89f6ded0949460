use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod migrate;

/// Grace window (minutes) used when classifying a time as "on time".
pub const DEFAULT_GRACE_MINUTES: i64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_user")]
    pub default_user: String,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_grace_minutes")]
    pub grace_minutes: i64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_user() -> String {
    "me".to_string()
}
fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}
fn default_grace_minutes() -> i64 {
    DEFAULT_GRACE_MINUTES
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            default_user: default_user(),
            bind: default_bind(),
            grace_minutes: default_grace_minutes(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Standard configuration directory (`~/.routinely`).
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".routinely")
    }

    /// Full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("routinely.conf")
    }

    /// Full path of the default SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("routinely.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
        } else {
            Ok(Config::default())
        }
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Write this configuration to the standard config file.
    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = self.to_yaml()?;
        let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Initialize configuration and database files.
    ///
    /// A relative `custom_db` is resolved against the config directory.
    /// In test mode the config file is left untouched.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = std::path::Path::new(name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            config.save()?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path).map_err(|e| {
                io::Error::new(e.kind(), format!("{}: {}", db_path.display(), e))
            })?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}
