//! Referential resolver - turns foreign keys into display names.
//!
//! Deletes never cascade, so any foreign key may point at a record that no longer
//! exists. Every lookup here tolerates that by resolving to [`UNKNOWN`].

use crate::{
    core::store::{Named, Record},
    models::{Course, CourseOffering, CourseType},
};

/// Placeholder shown for a dangling reference.
pub const UNKNOWN: &str = "Unknown";

/// Returns the display name of the record with `id`, or [`UNKNOWN`].
#[must_use]
pub fn resolve_name<T: Record + Named>(items: &[T], id: &str) -> String {
    items
        .iter()
        .find(|item| item.id() == id)
        .map_or_else(|| UNKNOWN.to_string(), |item| item.display_name().to_string())
}

/// Course and course type names behind an offering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OfferingDetails {
    pub course_name: String,
    pub course_type_name: String,
}

impl OfferingDetails {
    /// `"<course type> - <course>"`, the label offerings are listed and grouped under.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.course_type_name, self.course_name)
    }
}

/// Borrowed view over the three collections an offering join needs.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    pub course_types: &'a [CourseType],
    pub courses: &'a [Course],
    pub offerings: &'a [CourseOffering],
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub const fn new(
        course_types: &'a [CourseType],
        courses: &'a [Course],
        offerings: &'a [CourseOffering],
    ) -> Self {
        Self {
            course_types,
            courses,
            offerings,
        }
    }

    #[must_use]
    pub fn course_name(&self, course_id: &str) -> String {
        resolve_name(self.courses, course_id)
    }

    #[must_use]
    pub fn course_type_name(&self, course_type_id: &str) -> String {
        resolve_name(self.course_types, course_type_id)
    }

    #[must_use]
    pub fn offering(&self, offering_id: &str) -> Option<&'a CourseOffering> {
        self.offerings.iter().find(|o| o.id == offering_id)
    }

    /// Resolves both sides of an offering record.
    #[must_use]
    pub fn details_of(&self, offering: &CourseOffering) -> OfferingDetails {
        OfferingDetails {
            course_name: self.course_name(&offering.course_id),
            course_type_name: self.course_type_name(&offering.course_type_id),
        }
    }

    /// Resolves an offering id; a missing offering yields [`UNKNOWN`] for both names.
    #[must_use]
    pub fn offering_details(&self, offering_id: &str) -> OfferingDetails {
        self.offering(offering_id).map_or_else(
            || OfferingDetails {
                course_name: UNKNOWN.to_string(),
                course_type_name: UNKNOWN.to_string(),
            },
            |offering| self.details_of(offering),
        )
    }

    #[must_use]
    pub fn offering_label(&self, offering_id: &str) -> String {
        self.offering_details(offering_id).label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{course, course_type, offering};

    #[test]
    fn test_resolve_name_found_and_missing() {
        let courses = vec![course("c1", "Hindi"), course("c2", "Urdu")];

        assert_eq!(resolve_name(&courses, "c2"), "Urdu");
        assert_eq!(resolve_name(&courses, "nope"), UNKNOWN);
        assert_eq!(resolve_name::<Course>(&[], "c1"), UNKNOWN);
    }

    #[test]
    fn test_offering_details_and_label() {
        let types = vec![course_type("t1", "Group")];
        let courses = vec![course("c1", "Hindi")];
        let offerings = vec![offering("o1", "c1", "t1"), offering("o2", "gone", "t1")];
        let resolver = Resolver::new(&types, &courses, &offerings);

        assert_eq!(resolver.offering_label("o1"), "Group - Hindi");
        assert_eq!(resolver.offering_label("o2"), "Group - Unknown");
        assert_eq!(
            resolver.offering_details("missing"),
            OfferingDetails {
                course_name: UNKNOWN.to_string(),
                course_type_name: UNKNOWN.to_string(),
            }
        );
    }
}
