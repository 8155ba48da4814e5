//! Application state - the root object owning all four entity stores.
//!
//! Cross-collection rules live here: foreign keys must point at existing records when
//! an offering or registration is created, and joins for search, statistics and
//! export are built from one [`Resolver`] over the current collections. All mutation
//! goes through `&mut self`, so a mutation can never start while another is running.

use crate::{
    core::{
        csv,
        query::{self, OfferingQuery, RegistrationQuery},
        resolver::Resolver,
        stats::{self, RegistrationStats},
        store::{EntityStore, Record},
    },
    errors::{Error, Result},
    models::{
        Course, CourseInput, CourseOffering, CourseOfferingInput, CourseType, CourseTypeInput,
        RegistrationInput, StudentRegistration,
    },
    storage::Storage,
};
use std::sync::Arc;
use tracing::info;

/// The four entity stores over one shared [`Storage`].
pub struct AppState {
    course_types: EntityStore<CourseType>,
    courses: EntityStore<Course>,
    offerings: EntityStore<CourseOffering>,
    registrations: EntityStore<StudentRegistration>,
}

impl AppState {
    /// Loads every collection from `storage`; missing or unreadable data starts empty.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let state = Self {
            course_types: EntityStore::load(Arc::clone(&storage)),
            courses: EntityStore::load(Arc::clone(&storage)),
            offerings: EntityStore::load(Arc::clone(&storage)),
            registrations: EntityStore::load(storage),
        };
        info!(
            "Loaded {} course type(s), {} course(s), {} offering(s), {} registration(s)",
            state.course_types.len(),
            state.courses.len(),
            state.offerings.len(),
            state.registrations.len()
        );
        state
    }

    #[must_use]
    pub const fn course_types(&self) -> &EntityStore<CourseType> {
        &self.course_types
    }

    #[must_use]
    pub const fn courses(&self) -> &EntityStore<Course> {
        &self.courses
    }

    #[must_use]
    pub const fn offerings(&self) -> &EntityStore<CourseOffering> {
        &self.offerings
    }

    #[must_use]
    pub const fn registrations(&self) -> &EntityStore<StudentRegistration> {
        &self.registrations
    }

    /// Join view over the current collections.
    #[must_use]
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(
            self.course_types.list(),
            self.courses.list(),
            self.offerings.list(),
        )
    }

    // --- Course types ---

    pub fn create_course_type(&mut self, input: CourseTypeInput) -> Result<CourseType> {
        self.course_types.create(input)
    }

    pub fn update_course_type(&mut self, id: &str, input: CourseTypeInput) -> Result<CourseType> {
        self.course_types.update(id, input)
    }

    /// Deletes a course type. Offerings referencing it are kept and resolve to "Unknown".
    pub fn delete_course_type(&mut self, id: &str) -> Result<()> {
        self.course_types.delete(id)
    }

    // --- Courses ---

    pub fn create_course(&mut self, input: CourseInput) -> Result<Course> {
        self.courses.create(input)
    }

    pub fn update_course(&mut self, id: &str, input: CourseInput) -> Result<Course> {
        self.courses.update(id, input)
    }

    /// Deletes a course. Offerings referencing it are kept and resolve to "Unknown".
    pub fn delete_course(&mut self, id: &str) -> Result<()> {
        self.courses.delete(id)
    }

    // --- Course offerings ---

    /// Creates an offering after checking that both referenced records exist.
    ///
    /// # Errors
    /// `Error::Validation` for missing or unknown references, `Error::Duplicate` when
    /// the (course, course type) pair is already offered.
    pub fn create_course_offering(&mut self, input: CourseOfferingInput) -> Result<CourseOffering> {
        let mut messages = CourseOffering::validate(&input);
        if messages.is_empty() {
            if !self.courses.contains(&input.course_id) {
                messages.push("Selected course does not exist".to_string());
            }
            if !self.course_types.contains(&input.course_type_id) {
                messages.push("Selected course type does not exist".to_string());
            }
        }
        if !messages.is_empty() {
            return Err(Error::Validation { messages });
        }
        self.offerings.create(input)
    }

    /// Updates an offering. The pair uniqueness rule is not re-checked here.
    pub fn update_course_offering(
        &mut self,
        id: &str,
        input: CourseOfferingInput,
    ) -> Result<CourseOffering> {
        self.offerings.update(id, input)
    }

    /// Deletes an offering. Registrations referencing it are kept.
    pub fn delete_course_offering(&mut self, id: &str) -> Result<()> {
        self.offerings.delete(id)
    }

    /// True when at least one course and one course type exist to pair up.
    #[must_use]
    pub fn can_create_offering(&self) -> bool {
        !self.courses.is_empty() && !self.course_types.is_empty()
    }

    // --- Student registrations ---

    /// Registers a student after checking that the offering exists.
    ///
    /// # Errors
    /// `Error::Validation` for invalid input or an unknown offering, `Error::Duplicate`
    /// when the email is already registered for that offering.
    pub fn create_registration(&mut self, input: RegistrationInput) -> Result<StudentRegistration> {
        let mut messages = StudentRegistration::validate(&input);
        if messages.is_empty() && !self.offerings.contains(&input.course_offering_id) {
            messages.push("Selected course offering does not exist".to_string());
        }
        if !messages.is_empty() {
            return Err(Error::Validation { messages });
        }
        self.registrations.create(input)
    }

    pub fn update_registration(
        &mut self,
        id: &str,
        input: RegistrationInput,
    ) -> Result<StudentRegistration> {
        self.registrations.update(id, input)
    }

    pub fn delete_registration(&mut self, id: &str) -> Result<()> {
        self.registrations.delete(id)
    }

    /// True when there is at least one offering to register for.
    #[must_use]
    pub fn can_register(&self) -> bool {
        !self.offerings.is_empty()
    }

    // --- Queries ---

    #[must_use]
    pub fn search_course_types(&self, term: &str) -> Vec<&CourseType> {
        query::search_course_types(self.course_types.list(), term)
    }

    #[must_use]
    pub fn search_courses(&self, term: &str) -> Vec<&Course> {
        query::search_courses(self.courses.list(), term)
    }

    #[must_use]
    pub fn query_offerings(&self, query: &OfferingQuery) -> Vec<&CourseOffering> {
        query::query_offerings(&self.resolver(), query)
    }

    /// Offerings selectable when registering, narrowed to one course type if given.
    #[must_use]
    pub fn offerings_for_course_type(&self, course_type_id: Option<&str>) -> Vec<&CourseOffering> {
        query::offerings_for_course_type(self.offerings.list(), course_type_id)
    }

    #[must_use]
    pub fn query_registrations(&self, query: &RegistrationQuery) -> Vec<&StudentRegistration> {
        query::query_registrations(self.registrations.list(), &self.resolver(), query)
    }

    #[must_use]
    pub fn student_count(&self, offering_id: &str) -> usize {
        stats::student_count(self.registrations.list(), offering_id)
    }

    /// Statistics over every registration, regardless of any active query.
    #[must_use]
    pub fn registration_stats(&self) -> RegistrationStats {
        RegistrationStats::compute(self.registrations.list(), &self.resolver())
    }

    /// CSV of the registrations selected by `query`, in query order.
    #[must_use]
    pub fn export_registrations_csv(&self, query: &RegistrationQuery) -> String {
        let rows = self.query_registrations(query);
        csv::export_registrations(&rows, self.resolver())
    }
}
