//! `SQLite` storage backend built on `SeaORM`.
//!
//! `SeaORM` is async while the registry is synchronous, so the backend owns a
//! current-thread Tokio runtime and blocks on it for each call. It must not be used
//! from inside another Tokio runtime.

use super::Storage;
use crate::{
    config::database,
    entities::{StorageEntry, storage_entry},
    errors::Result,
};
use sea_orm::{DatabaseConnection, EntityTrait, Set, sea_query::OnConflict};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info, instrument};

/// Key-value storage persisted in the `storage_entries` table.
pub struct SqliteStorage {
    runtime: Runtime,
    db: DatabaseConnection,
}

impl SqliteStorage {
    /// Connects to `database_url` and makes sure the table exists.
    ///
    /// # Errors
    /// Returns an error if the runtime cannot be built, the connection fails, or the
    /// table cannot be created.
    #[instrument]
    pub fn open(database_url: &str) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let db = runtime.block_on(async {
            let db = database::create_connection(database_url).await?;
            database::create_tables(&db).await?;
            Ok::<_, crate::errors::Error>(db)
        })?;

        info!("Storage database ready at {}", database_url);
        Ok(Self { runtime, db })
    }

    /// Opens a private in-memory database.
    pub fn in_memory() -> Result<Self> {
        Self::open("sqlite::memory:")
    }
}

impl Storage for SqliteStorage {
    #[instrument(skip(self))]
    fn load(&self, key: &str) -> Result<Option<String>> {
        let entry = self
            .runtime
            .block_on(StorageEntry::find_by_id(key.to_string()).one(&self.db))?;
        debug!("Storage entry '{}' present: {}", key, entry.is_some());
        Ok(entry.map(|e| e.value))
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn save(&self, key: &str, value: &str) -> Result<()> {
        let entry = storage_entry::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(chrono::Utc::now()),
        };

        self.runtime.block_on(
            StorageEntry::insert(entry)
                .on_conflict(
                    OnConflict::column(storage_entry::Column::Key)
                        .update_columns([
                            storage_entry::Column::Value,
                            storage_entry::Column::UpdatedAt,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(&self.db),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::Course, storage::load_collection};

    #[test]
    fn test_load_missing_key() -> Result<()> {
        let storage = SqliteStorage::in_memory()?;
        assert_eq!(storage.load("courses")?, None);
        Ok(())
    }

    #[test]
    fn test_save_upserts() -> Result<()> {
        let storage = SqliteStorage::in_memory()?;
        storage.save("courses", "[]")?;
        storage.save("courses", r#"[{"id":"c1","name":"Hindi","createdAt":1}]"#)?;

        let courses: Vec<Course> = load_collection(&storage, "courses");
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].name, "Hindi");
        Ok(())
    }

    #[test]
    fn test_values_survive_reopen() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("registry.sqlite").display()
        );

        {
            let storage = SqliteStorage::open(&url)?;
            storage.save("courseTypes", "[]")?;
        }

        let reopened = SqliteStorage::open(&url)?;
        assert_eq!(reopened.load("courseTypes")?.as_deref(), Some("[]"));
        Ok(())
    }
}
