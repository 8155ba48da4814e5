//! Aggregate statistics over full collections.
//!
//! Statistics describe the whole store, never the currently filtered view: callers
//! pass the complete collection, not a query result.

use crate::{
    core::resolver::Resolver,
    models::{PaymentStatus, RegistrationStatus, StudentRegistration},
};
use std::collections::HashSet;

/// Number of items satisfying `predicate`.
pub fn count<T, F>(items: &[T], predicate: F) -> usize
where
    F: Fn(&T) -> bool,
{
    items.iter().filter(|item| predicate(*item)).count()
}

/// A label and how many items carried it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupCount {
    pub label: String,
    pub count: usize,
}

/// Counts items per derived label, in the order labels are first seen.
pub fn group_count<T, F>(items: &[T], key: F) -> Vec<GroupCount>
where
    F: Fn(&T) -> String,
{
    let mut groups: Vec<GroupCount> = Vec::new();
    for item in items {
        let label = key(item);
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.count += 1,
            None => groups.push(GroupCount { label, count: 1 }),
        }
    }
    groups
}

/// `numerator / denominator`, or 0 when the denominator is 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

/// Number of registrations referencing `offering_id`.
#[must_use]
pub fn student_count(registrations: &[StudentRegistration], offering_id: &str) -> usize {
    count(registrations, |r| r.course_offering_id == offering_id)
}

/// Summary shown above the registration list.
#[derive(Clone, Debug, PartialEq)]
pub struct RegistrationStats {
    pub total_students: usize,
    /// Distinct offerings with at least one registration
    pub unique_offerings: usize,
    pub average_per_offering: f64,
    pub by_status: Vec<(RegistrationStatus, usize)>,
    pub by_payment_status: Vec<(PaymentStatus, usize)>,
    /// Registrations per `"<course type> - <course>"` label
    pub by_offering: Vec<GroupCount>,
}

impl RegistrationStats {
    /// Computes the summary over the full registration collection.
    #[must_use]
    pub fn compute(registrations: &[StudentRegistration], resolver: &Resolver<'_>) -> Self {
        let total_students = registrations.len();
        let unique_offerings = registrations
            .iter()
            .map(|r| r.course_offering_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        let by_status = RegistrationStatus::ALL
            .into_iter()
            .map(|status| (status, count(registrations, |r| r.status == status)))
            .collect();
        let by_payment_status = PaymentStatus::ALL
            .into_iter()
            .map(|status| (status, count(registrations, |r| r.payment_status == status)))
            .collect();
        let by_offering = group_count(registrations, |r| {
            resolver.offering_label(&r.course_offering_id)
        });

        Self {
            total_students,
            unique_offerings,
            average_per_offering: average(total_students, unique_offerings),
            by_status,
            by_payment_status,
            by_offering,
        }
    }

    /// Average formatted to one decimal place, as displayed.
    #[must_use]
    pub fn average_display(&self) -> String {
        format!("{:.1}", self.average_per_offering)
    }

    #[must_use]
    pub fn status_count(&self, status: RegistrationStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }

    #[must_use]
    pub fn payment_count(&self, status: PaymentStatus) -> usize {
        self.by_payment_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{course, course_type, offering, registration};

    #[test]
    fn test_average_guards_zero() {
        assert_eq!(average(5, 0), 0.0);
        assert_eq!(average(3, 2), 1.5);
    }

    #[test]
    fn test_group_count_first_seen_order() {
        let words = ["b", "a", "b", "c", "a", "b"];
        let groups = group_count(&words, |w| (*w).to_string());
        assert_eq!(
            groups,
            vec![
                GroupCount {
                    label: "b".to_string(),
                    count: 3,
                },
                GroupCount {
                    label: "a".to_string(),
                    count: 2,
                },
                GroupCount {
                    label: "c".to_string(),
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_registration_stats() {
        let types = vec![course_type("t1", "Group")];
        let courses = vec![course("c1", "Hindi"), course("c2", "Urdu")];
        let offerings = vec![offering("o1", "c1", "t1"), offering("o2", "c2", "t1")];
        let resolver = Resolver::new(&types, &courses, &offerings);

        let mut paid = registration("r3", "Cara", "Moss", "cara@x.io", "o2", 300);
        paid.payment_status = PaymentStatus::Paid;
        paid.status = RegistrationStatus::Completed;
        let regs = vec![
            registration("r1", "Bob", "Stone", "bob@x.io", "o1", 100),
            registration("r2", "Ann", "Lee", "ann@x.io", "o1", 200),
            paid,
        ];

        let stats = RegistrationStats::compute(&regs, &resolver);

        assert_eq!(stats.total_students, 3);
        assert_eq!(stats.unique_offerings, 2);
        assert_eq!(stats.average_display(), "1.5");
        assert_eq!(stats.status_count(RegistrationStatus::Active), 2);
        assert_eq!(stats.status_count(RegistrationStatus::Completed), 1);
        assert_eq!(stats.status_count(RegistrationStatus::Withdrawn), 0);
        assert_eq!(stats.payment_count(PaymentStatus::Pending), 2);
        assert_eq!(stats.payment_count(PaymentStatus::Paid), 1);
        assert_eq!(
            stats.by_offering,
            vec![
                GroupCount {
                    label: "Group - Hindi".to_string(),
                    count: 2,
                },
                GroupCount {
                    label: "Group - Urdu".to_string(),
                    count: 1,
                },
            ]
        );
        assert_eq!(student_count(&regs, "o1"), 2);
        assert_eq!(student_count(&regs, "missing"), 0);
    }

    #[test]
    fn test_empty_stats() {
        let resolver = Resolver::new(&[], &[], &[]);
        let stats = RegistrationStats::compute(&[], &resolver);
        assert_eq!(stats.total_students, 0);
        assert_eq!(stats.average_per_offering, 0.0);
        assert_eq!(stats.average_display(), "0.0");
        assert!(stats.by_offering.is_empty());
    }
}
