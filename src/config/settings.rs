//! Application settings loading from config.toml
//!
//! Every field has a default, so a missing config file is not an error. The
//! `DATABASE_URL` and `EXPORT_DIR` environment variables (typically from `.env`)
//! override whatever the file says.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default `SQLite` location, created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/course_registry.sqlite?mode=rwc";
/// Default directory CSV exports are written to.
pub const DEFAULT_EXPORT_DIR: &str = "exports";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub export: ExportConfig,
}

/// `[storage]` section
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// `SeaORM` connection URL for the key-value store
    pub database_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

/// `[export]` section
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory CSV exports are written into
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }
}

impl AppConfig {
    /// Applies overrides from a variable lookup (`DATABASE_URL`, `EXPORT_DIR`).
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            debug!("DATABASE_URL overrides configured database url");
            self.storage.database_url = url;
        }
        if let Some(dir) = lookup("EXPORT_DIR") {
            debug!("EXPORT_DIR overrides configured export directory");
            self.export.directory = PathBuf::from(dir);
        }
        self
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads `./config.toml` if present, falling back to defaults, then applies
/// environment overrides.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = Path::new("config.toml");
    let config = if path.exists() {
        load_config(path)?
    } else {
        info!("No config.toml found, using default settings.");
        AppConfig::default()
    };
    Ok(config.with_overrides(|key| std::env::var(key).ok()))
}
