//! Shared test utilities for the course registry.
//!
//! This module provides record fixtures with fixed ids, storage doubles, and helpers
//! for setting up an [`AppState`] with sensible defaults.

use crate::{
    core::{state::AppState, store::Record},
    errors::{Error, Result},
    models::{
        Course, CourseInput, CourseOffering, CourseOfferingInput, CourseType, CourseTypeInput,
        RegistrationInput, StudentRegistration,
    },
    storage::{MemoryStorage, Storage},
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

fn at_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// Course type with a fixed id.
pub fn course_type(id: &str, name: &str) -> CourseType {
    CourseType::create(id.to_string(), at_millis(0), CourseTypeInput::new(name))
}

/// Course with a fixed id.
pub fn course(id: &str, name: &str) -> Course {
    Course::create(id.to_string(), at_millis(0), CourseInput::new(name))
}

/// Offering with a fixed id.
pub fn offering(id: &str, course_id: &str, course_type_id: &str) -> CourseOffering {
    CourseOffering::create(
        id.to_string(),
        at_millis(0),
        CourseOfferingInput::new(course_id, course_type_id),
    )
}

/// Registration with a fixed id and `registered_at` (epoch millis).
///
/// # Defaults
/// * `status`: active
/// * `payment_status`: pending
/// * no phone, address, date of birth or notes
pub fn registration(
    id: &str,
    first_name: &str,
    last_name: &str,
    email: &str,
    course_offering_id: &str,
    registered_at_millis: i64,
) -> StudentRegistration {
    StudentRegistration::create(
        id.to_string(),
        at_millis(registered_at_millis),
        RegistrationInput::new(first_name, last_name, email, course_offering_id),
    )
}

/// Storage whose every operation fails, for exercising best-effort persistence.
pub struct FailingStorage;

impl Storage for FailingStorage {
    fn load(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::Storage {
            message: "storage unavailable".to_string(),
        })
    }

    fn save(&self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::Storage {
            message: "storage unavailable".to_string(),
        })
    }
}

/// Creates an empty [`AppState`] over a fresh in-memory storage.
/// Returns the storage too so tests can reload from it.
pub fn setup_state() -> (AppState, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let state = AppState::load(Arc::clone(&storage) as Arc<dyn Storage>);
    (state, storage)
}

/// Records created by [`seeded_state`].
pub struct Seed {
    pub group: CourseType,
    pub hindi: Course,
    pub urdu: Course,
    pub hindi_group: CourseOffering,
    pub urdu_group: CourseOffering,
}

/// Sets up a state with one course type ("Group"), two courses ("Hindi", "Urdu")
/// and one offering for each course under that type. No registrations.
pub fn seeded_state() -> Result<(AppState, Seed)> {
    let (mut state, _) = setup_state();
    let group = state.create_course_type(CourseTypeInput::new("Group"))?;
    let hindi = state.create_course(CourseInput::new("Hindi"))?;
    let urdu = state.create_course(CourseInput::new("Urdu"))?;
    let hindi_group =
        state.create_course_offering(CourseOfferingInput::new(&hindi.id, &group.id))?;
    let urdu_group = state.create_course_offering(CourseOfferingInput::new(&urdu.id, &group.id))?;

    Ok((
        state,
        Seed {
            group,
            hindi,
            urdu,
            hindi_group,
            urdu_group,
        },
    ))
}
