//! Domain records - the four entity collections managed by the registry.
//!
//! Each record serializes to the persisted layout: camelCase field names, timestamps
//! as epoch milliseconds, optional fields omitted when absent. Each record also has a
//! matching `*Input` type carrying the caller-editable fields.

pub mod course;
pub mod course_offering;
pub mod course_type;
pub mod student_registration;

pub use course::{Course, CourseInput};
pub use course_offering::{CourseOffering, CourseOfferingInput};
pub use course_type::{CourseType, CourseTypeInput};
pub use student_registration::{
    PaymentStatus, RegistrationInput, RegistrationStatus, StudentRegistration,
};

/// Trims an optional text field, collapsing blank values to `None`.
pub(crate) fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_optional() {
        assert_eq!(clean_optional(None), None);
        assert_eq!(clean_optional(Some("   ".to_string())), None);
        assert_eq!(
            clean_optional(Some(" 555-0100 ".to_string())),
            Some("555-0100".to_string())
        );
    }
}
