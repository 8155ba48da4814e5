//! Entity store - sole owner and mutation authority for one record collection.
//!
//! A store validates input, checks the record's duplicate rule, mutates its ordered
//! collection and then writes the full snapshot to [`Storage`]. A failed write is
//! logged and does not undo the in-memory change: the in-memory collection stays the
//! source of truth for the rest of the session.

use crate::{
    core::id,
    errors::{Error, Result},
    storage::{self, Storage},
};
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{debug, error};

/// A record type that can live in an [`EntityStore`].
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Caller-editable fields used by create and update.
    type Input;

    /// Human-readable entity name used in errors and logs.
    const ENTITY: &'static str;
    /// Key the collection is persisted under.
    const STORAGE_KEY: &'static str;
    /// Message reported when [`Record::is_duplicate`] rejects an input.
    const DUPLICATE_MESSAGE: &'static str = "This record already exists!";

    fn id(&self) -> &str;

    /// Returns every violated rule; empty means valid.
    fn validate(input: &Self::Input) -> Vec<String>;

    /// Uniqueness rule checked on create only. Records without one accept everything.
    fn is_duplicate(_existing: &[Self], _input: &Self::Input) -> bool {
        false
    }

    /// Builds a new record from validated input.
    fn create(id: String, now: DateTime<Utc>, input: Self::Input) -> Self;

    /// Replaces the mutable fields and stamps the update time. Never touches the id or
    /// creation timestamp.
    fn apply_update(&mut self, input: Self::Input, now: DateTime<Utc>);
}

/// A record with a display name that foreign keys can be resolved to.
pub trait Named {
    fn display_name(&self) -> &str;
}

/// Ordered, persisted collection of one record type.
pub struct EntityStore<T: Record> {
    items: Vec<T>,
    storage: Arc<dyn Storage>,
}

impl<T: Record> EntityStore<T> {
    /// Creates a store over an already-loaded collection.
    #[must_use]
    pub fn new(items: Vec<T>, storage: Arc<dyn Storage>) -> Self {
        Self { items, storage }
    }

    /// Loads the collection from `storage`, starting empty when nothing usable is stored.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let items = storage::load_collection(storage.as_ref(), T::STORAGE_KEY);
        debug!("Loaded {} {} record(s)", items.len(), T::ENTITY);
        Self { items, storage }
    }

    /// Current collection in insertion order.
    #[must_use]
    pub fn list(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Validates, checks for duplicates, appends and persists a new record.
    ///
    /// # Errors
    /// `Error::Validation` with every violated rule, or `Error::Duplicate` when the
    /// record's uniqueness rule rejects the input. The collection is unchanged on error.
    pub fn create(&mut self, input: T::Input) -> Result<T> {
        let messages = T::validate(&input);
        if !messages.is_empty() {
            debug!("{} rejected by validation: {:?}", T::ENTITY, messages);
            return Err(Error::Validation { messages });
        }

        if T::is_duplicate(&self.items, &input) {
            debug!("{} rejected as duplicate", T::ENTITY);
            return Err(Error::Duplicate {
                message: T::DUPLICATE_MESSAGE.to_string(),
            });
        }

        let record = T::create(id::new_id(), id::now(), input);
        self.items.push(record.clone());
        debug!("Created {} {}", T::ENTITY, record.id());
        self.persist();
        Ok(record)
    }

    /// Validates and applies `input` to the record with `id`, keeping its position.
    ///
    /// # Errors
    /// `Error::Validation` for invalid input, `Error::NotFound` if `id` is absent.
    pub fn update(&mut self, id: &str, input: T::Input) -> Result<T> {
        let messages = T::validate(&input);
        if !messages.is_empty() {
            return Err(Error::Validation { messages });
        }

        let record = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| Error::NotFound {
                entity: T::ENTITY,
                id: id.to_string(),
            })?;

        record.apply_update(input, id::now());
        let updated = record.clone();
        debug!("Updated {} {}", T::ENTITY, id);
        self.persist();
        Ok(updated)
    }

    /// Removes the record with `id`. References to it elsewhere are left dangling.
    ///
    /// # Errors
    /// `Error::NotFound` if `id` is absent.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let position = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| Error::NotFound {
                entity: T::ENTITY,
                id: id.to_string(),
            })?;

        self.items.remove(position);
        debug!("Deleted {} {}", T::ENTITY, id);
        self.persist();
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) =
            storage::save_collection(self.storage.as_ref(), T::STORAGE_KEY, &self.items)
        {
            error!(
                "Failed to persist {} collection ({} records kept in memory): {}",
                T::ENTITY,
                self.items.len(),
                e
            );
        }
    }
}
