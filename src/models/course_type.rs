//! Course type record - a category of course delivery (e.g. "Individual", "Group").

use crate::core::{
    store::{Named, Record},
    validation,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course type as stored in the `courseTypes` collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseType {
    /// Unique identifier assigned at creation
    pub id: String,
    /// Display name, trimmed, 2-50 characters
    pub name: String,
    /// Creation time, never changed by updates
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Time of the last successful update
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Caller-editable fields of a [`CourseType`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CourseTypeInput {
    pub name: String,
}

impl CourseTypeInput {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Record for CourseType {
    type Input = CourseTypeInput;

    const ENTITY: &'static str = "Course type";
    const STORAGE_KEY: &'static str = "courseTypes";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(input: &Self::Input) -> Vec<String> {
        validation::validate_course_type(&input.name)
    }

    fn create(id: String, now: DateTime<Utc>, input: Self::Input) -> Self {
        Self {
            id,
            name: input.name.trim().to_string(),
            created_at: now,
            updated_at: None,
        }
    }

    fn apply_update(&mut self, input: Self::Input, now: DateTime<Utc>) {
        self.name = input.name.trim().to_string();
        self.updated_at = Some(now);
    }
}

impl Named for CourseType {
    fn display_name(&self) -> &str {
        &self.name
    }
}
