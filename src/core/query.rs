//! Query engine - search, filter and sort over store contents.
//!
//! Queries borrow from the collections and never mutate them. The composition order is
//! fixed: filter, then search, then sort. Aggregate statistics live in
//! [`stats`](crate::core::stats) and always run over full collections instead.

use crate::{
    core::resolver::Resolver,
    models::{
        Course, CourseOffering, CourseType, PaymentStatus, RegistrationStatus,
        StudentRegistration,
    },
};
use std::{cmp::Ordering, fmt, str::FromStr};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Case-insensitive substring match of `term` against any of `fields`.
///
/// An empty term matches everything.
#[must_use]
pub fn matches_search<S: AsRef<str>>(fields: &[S], term: &str) -> bool {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.as_ref().to_lowercase().contains(&needle))
}

/// Keeps the items whose projected fields match `term`, in input order.
pub fn search<'a, T, I, F>(items: I, term: &str, project: F) -> Vec<&'a T>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> Vec<String>,
{
    items
        .into_iter()
        .filter(|item| matches_search(&project(*item), term))
        .collect()
}

/// Treats an empty filter value the same as an unset one.
fn active_filter(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[must_use]
pub fn search_course_types<'a>(items: &'a [CourseType], term: &str) -> Vec<&'a CourseType> {
    search(items, term, |ct| vec![ct.name.clone()])
}

#[must_use]
pub fn search_courses<'a>(items: &'a [Course], term: &str) -> Vec<&'a Course> {
    search(items, term, |c| vec![c.name.clone()])
}

/// Search and filter parameters for the offering list.
#[derive(Clone, Debug, Default)]
pub struct OfferingQuery {
    pub search: String,
    pub course_type_id: Option<String>,
}

/// Offerings of one course type, or all of them when no type is given.
#[must_use]
pub fn offerings_for_course_type<'a>(
    offerings: &'a [CourseOffering],
    course_type_id: Option<&str>,
) -> Vec<&'a CourseOffering> {
    match active_filter(course_type_id) {
        Some(type_id) => offerings
            .iter()
            .filter(|o| o.course_type_id == type_id)
            .collect(),
        None => offerings.iter().collect(),
    }
}

/// Filters by course type, then searches the resolved course and course type names.
#[must_use]
pub fn query_offerings<'a>(resolver: &Resolver<'a>, query: &OfferingQuery) -> Vec<&'a CourseOffering> {
    let filtered = offerings_for_course_type(resolver.offerings, query.course_type_id.as_deref());
    search(filtered, &query.search, |o| {
        let details = resolver.details_of(o);
        vec![details.course_name, details.course_type_name]
    })
}

/// Sort orders available for registrations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RegistrationSort {
    /// Newest first
    #[default]
    DateDesc,
    DateAsc,
    NameAsc,
    NameDesc,
}

impl RegistrationSort {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
        }
    }
}

impl fmt::Display for RegistrationSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "date-desc" => Ok(Self::DateDesc),
            "date-asc" => Ok(Self::DateAsc),
            "name-asc" => Ok(Self::NameAsc),
            "name-desc" => Ok(Self::NameDesc),
            other => Err(format!("Unknown sort order: {other}")),
        }
    }
}

/// Primary collation key: decomposed, accents dropped, lowercased.
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Compares display names the way a reader expects: accents and case are ignored
/// first, so "Émile" sorts next to "Eve" and "ann" next to "Ann". Ties fall back to
/// case-insensitive, then exact comparison.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Sorts in place. The sort is stable, so equal keys keep their collection order in
/// both directions.
pub fn sort_registrations(rows: &mut [&StudentRegistration], sort: RegistrationSort) {
    match sort {
        RegistrationSort::DateDesc => rows.sort_by(|a, b| b.registered_at.cmp(&a.registered_at)),
        RegistrationSort::DateAsc => rows.sort_by(|a, b| a.registered_at.cmp(&b.registered_at)),
        RegistrationSort::NameAsc => {
            rows.sort_by(|a, b| compare_names(&a.full_name(), &b.full_name()));
        }
        RegistrationSort::NameDesc => {
            rows.sort_by(|a, b| compare_names(&b.full_name(), &a.full_name()));
        }
    }
}

/// Search, filter and sort parameters for the registration list.
#[derive(Clone, Debug, Default)]
pub struct RegistrationQuery {
    pub search: String,
    pub course_offering_id: Option<String>,
    pub status: Option<RegistrationStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub sort: RegistrationSort,
}

/// Projection searched for a registration: full name, email, phone, and the resolved
/// course and course type names of its offering.
#[must_use]
pub fn registration_search_fields(
    registration: &StudentRegistration,
    resolver: &Resolver<'_>,
) -> Vec<String> {
    let details = resolver.offering_details(&registration.course_offering_id);
    vec![
        registration.full_name(),
        registration.email.clone(),
        registration.phone.clone().unwrap_or_default(),
        details.course_name,
        details.course_type_name,
    ]
}

/// Runs filter, search, then sort over `registrations`.
#[must_use]
pub fn query_registrations<'a>(
    registrations: &'a [StudentRegistration],
    resolver: &Resolver<'_>,
    query: &RegistrationQuery,
) -> Vec<&'a StudentRegistration> {
    let offering_id = active_filter(query.course_offering_id.as_deref());
    let filtered = registrations.iter().filter(|r| {
        offering_id.is_none_or(|id| r.course_offering_id == id)
            && query.status.is_none_or(|s| r.status == s)
            && query.payment_status.is_none_or(|p| r.payment_status == p)
    });

    let mut rows = search(filtered, &query.search, |r| {
        registration_search_fields(r, resolver)
    });
    sort_registrations(&mut rows, query.sort);
    rows
}
