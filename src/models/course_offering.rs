//! Course offering record - a concrete (course, course type) pairing students register for.
//!
//! Offerings are join rows between [`Course`](super::Course) and
//! [`CourseType`](super::CourseType). Each pair may exist only once; the pair is
//! checked when an offering is created but not when it is edited.

use crate::core::{store::Record, validation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOffering {
    pub id: String,
    /// References `Course::id`; may dangle after the course is deleted
    pub course_id: String,
    /// References `CourseType::id`; may dangle after the course type is deleted
    pub course_type_id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Caller-editable fields of a [`CourseOffering`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOfferingInput {
    pub course_id: String,
    pub course_type_id: String,
}

impl CourseOfferingInput {
    #[must_use]
    pub fn new(course_id: impl Into<String>, course_type_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            course_type_id: course_type_id.into(),
        }
    }
}

impl Record for CourseOffering {
    type Input = CourseOfferingInput;

    const ENTITY: &'static str = "Course offering";
    const STORAGE_KEY: &'static str = "courseOfferings";
    const DUPLICATE_MESSAGE: &'static str = "This course offering already exists!";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(input: &Self::Input) -> Vec<String> {
        validation::validate_course_offering(&input.course_id, &input.course_type_id)
    }

    fn is_duplicate(existing: &[Self], input: &Self::Input) -> bool {
        existing.iter().any(|o| {
            o.course_id == input.course_id && o.course_type_id == input.course_type_id
        })
    }

    fn create(id: String, now: DateTime<Utc>, input: Self::Input) -> Self {
        Self {
            id,
            course_id: input.course_id,
            course_type_id: input.course_type_id,
            created_at: now,
            updated_at: None,
        }
    }

    fn apply_update(&mut self, input: Self::Input, now: DateTime<Utc>) {
        self.course_id = input.course_id;
        self.course_type_id = input.course_type_id;
        self.updated_at = Some(now);
    }
}
