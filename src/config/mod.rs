/// Database connection and table creation for the `SQLite` storage backend
pub mod database;

/// Application settings loaded from config.toml and environment variables
pub mod settings;

pub use settings::{AppConfig, ExportConfig, StorageConfig, load_app_configuration};
