//! Database configuration module for the `SQLite` storage backend.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! The only table is `storage_entries`, generated from the entity definition with
//! `Schema::create_table_from_entity` so the schema always matches the Rust struct.
//! Table creation is idempotent, which lets an existing database file be reopened.

use crate::entities::StorageEntry;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::debug;

/// Creates the parent directory of a file-backed `sqlite://` URL.
///
/// `SQLite` creates a missing database file but not missing directories. In-memory and
/// non-`SQLite` URLs are left alone.
pub fn ensure_sqlite_parent_dir(database_url: &str) -> Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let file = rest.split('?').next().unwrap_or_default();
    if file.is_empty() || file.contains(":memory:") {
        return Ok(());
    }
    if let Some(parent) = Path::new(file).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Establishes a connection to the database at `database_url`.
///
/// `SQLite` file URLs should carry `?mode=rwc` so a missing file is created.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database at {}", database_url);
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the `storage_entries` table if it does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut storage_table = schema.create_table_from_entity(StorageEntry);
    storage_table.if_not_exists();

    db.execute(builder.build(&storage_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::StorageEntryModel;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Table exists and is queryable
        let rows: Vec<StorageEntryModel> = StorageEntry::find().limit(1).all(&db).await?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[test]
    fn test_ensure_sqlite_parent_dir() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("data").join("registry.sqlite");
        let url = format!("sqlite://{}?mode=rwc", nested.display());

        ensure_sqlite_parent_dir(&url)?;
        assert!(dir.path().join("data").is_dir());

        // Nothing to create for these
        ensure_sqlite_parent_dir("sqlite::memory:")?;
        ensure_sqlite_parent_dir("postgres://localhost/db")?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
