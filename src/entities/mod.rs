//! Entity module - `SeaORM` entity definitions for the `SQLite` storage backend.
//! The registry persists whole collection snapshots, so a single key-value table
//! is all the schema there is.

pub mod storage_entry;

pub use storage_entry::{
    Column as StorageEntryColumn, Entity as StorageEntry, Model as StorageEntryModel,
};
