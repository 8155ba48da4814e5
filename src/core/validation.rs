//! Input validation rules for every record type.
//!
//! Each validator returns the full list of violated rules as user-facing messages; an
//! empty list means the input is acceptable. Length rules apply to the trimmed value
//! and are only reported when the value is present, so a one-character name yields
//! the "too short" message alone.

use regex::Regex;
use std::sync::LazyLock;

/// Simple `local@domain.tld` shape check, no whitespace and exactly one `@`.
#[allow(clippy::expect_used)]
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

const MIN_NAME_LEN: usize = 2;
const MAX_COURSE_TYPE_NAME_LEN: usize = 50;
const MAX_COURSE_NAME_LEN: usize = 100;

fn validate_name(name: &str, label: &str, max_len: usize, errors: &mut Vec<String>) {
    let len = name.trim().chars().count();
    if len == 0 {
        errors.push(format!("{label} is required"));
    } else if len < MIN_NAME_LEN {
        errors.push(format!("{label} must be at least {MIN_NAME_LEN} characters"));
    } else if len > max_len {
        errors.push(format!("{label} must not exceed {max_len} characters"));
    }
}

/// Validates a course type name (2-50 characters after trimming).
#[must_use]
pub fn validate_course_type(name: &str) -> Vec<String> {
    let mut errors = Vec::new();
    validate_name(name, "Course type name", MAX_COURSE_TYPE_NAME_LEN, &mut errors);
    errors
}

/// Validates a course name (2-100 characters after trimming).
#[must_use]
pub fn validate_course(name: &str) -> Vec<String> {
    let mut errors = Vec::new();
    validate_name(name, "Course name", MAX_COURSE_NAME_LEN, &mut errors);
    errors
}

/// Validates that both sides of a course offering are selected.
#[must_use]
pub fn validate_course_offering(course_id: &str, course_type_id: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if course_id.trim().is_empty() {
        errors.push("Please select a course".to_string());
    }

    if course_type_id.trim().is_empty() {
        errors.push("Please select a course type".to_string());
    }

    errors
}

/// Returns true when `email` has the `local@domain.tld` shape.
///
/// Surrounding whitespace is ignored, matching the trimmed value that gets stored.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Validates the required fields of a student registration.
#[must_use]
pub fn validate_student_registration(
    first_name: &str,
    last_name: &str,
    email: &str,
    course_offering_id: &str,
) -> Vec<String> {
    let mut errors = Vec::new();

    let first_len = first_name.trim().chars().count();
    if first_len == 0 {
        errors.push("First name is required".to_string());
    } else if first_len < MIN_NAME_LEN {
        errors.push(format!("First name must be at least {MIN_NAME_LEN} characters"));
    }

    let last_len = last_name.trim().chars().count();
    if last_len == 0 {
        errors.push("Last name is required".to_string());
    } else if last_len < MIN_NAME_LEN {
        errors.push(format!("Last name must be at least {MIN_NAME_LEN} characters"));
    }

    if email.trim().is_empty() {
        errors.push("Email is required".to_string());
    } else if !is_valid_email(email) {
        errors.push("Please enter a valid email address".to_string());
    }

    if course_offering_id.trim().is_empty() {
        errors.push("Please select a course offering".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_surrounding_whitespace_is_ignored() {
        assert!(is_valid_email(" a@b.com"));
        assert!(is_valid_email("a@b.com \t"));
        assert!(!is_valid_email("a @b.com"));
        assert!(
            validate_student_registration("Asha", "Rao", "  asha@example.com  ", "o1").is_empty()
        );
    }

    #[test]
    fn test_course_name_too_short_only() {
        assert_eq!(
            validate_course("A"),
            vec!["Course name must be at least 2 characters".to_string()]
        );
    }

    #[test]
    fn test_course_type_name_rules() {
        assert_eq!(
            validate_course_type("   "),
            vec!["Course type name is required".to_string()]
        );
        assert!(validate_course_type("  Group  ").is_empty());
        assert!(validate_course_type(&"x".repeat(50)).is_empty());
        assert_eq!(
            validate_course_type(&"x".repeat(51)),
            vec!["Course type name must not exceed 50 characters".to_string()]
        );
    }

    #[test]
    fn test_course_name_allows_up_to_100() {
        assert!(validate_course(&"x".repeat(100)).is_empty());
        assert_eq!(validate_course(&"x".repeat(101)).len(), 1);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Two characters, six bytes
        assert!(validate_course("हि").is_empty());
    }

    #[test]
    fn test_course_offering_requires_both_ids() {
        assert_eq!(
            validate_course_offering("", ""),
            vec![
                "Please select a course".to_string(),
                "Please select a course type".to_string()
            ]
        );
        assert!(validate_course_offering("c1", "t1").is_empty());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email(" john.doe@example.com "));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("@b.com"));
    }

    #[test]
    fn test_registration_reports_every_violation() {
        let errors = validate_student_registration("J", "", "not-an-email", "");
        assert_eq!(
            errors,
            vec![
                "First name must be at least 2 characters".to_string(),
                "Last name is required".to_string(),
                "Please enter a valid email address".to_string(),
                "Please select a course offering".to_string(),
            ]
        );
    }

    #[test]
    fn test_registration_valid() {
        assert!(validate_student_registration("John", "Doe", "john@example.com", "o1").is_empty());
    }
}
