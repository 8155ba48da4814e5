//! Storage entry entity - one persisted collection snapshot per row.
//!
//! Rows are keyed by collection name (`courseTypes`, `courses`, `courseOfferings`,
//! `studentRegistrations`); `value` holds the JSON array for that collection.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Storage entry database model - stores one key-value pair
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "storage_entries")]
pub struct Model {
    /// Collection name
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Serialized collection snapshot
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this entry was last written
    pub updated_at: DateTimeUtc,
}

/// `StorageEntry` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
