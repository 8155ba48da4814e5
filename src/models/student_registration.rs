//! Student registration record - one student enrolled in one course offering.

use super::clean_optional;
use crate::core::{store::Record, validation};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};
use tracing::warn;

/// Enrollment state of a registration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    #[default]
    Active,
    Inactive,
    Completed,
    Withdrawn,
}

impl RegistrationStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 4] = [
        Self::Active,
        Self::Inactive,
        Self::Completed,
        Self::Withdrawn,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Completed => "completed",
            Self::Withdrawn => "withdrawn",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown registration status: {s}"))
    }
}

/// Payment state of a registration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Partial,
    Paid,
}

impl PaymentStatus {
    /// Every payment status, in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Partial, Self::Paid];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Partial => "partial",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown payment status: {s}"))
    }
}

/// A registration as stored in the `studentRegistrations` collection.
///
/// `status` and `payment_status` default when absent so that records written before
/// those fields existed still load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRegistration {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Blank or unparseable stored values load as `None`
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_date"
    )]
    pub date_of_birth: Option<NaiveDate>,
    /// References `CourseOffering::id`
    pub course_offering_id: String,
    /// Creation time of the registration, never changed by updates
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub registered_at: DateTime<Utc>,
    #[serde(default)]
    pub status: RegistrationStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Reads an optional `YYYY-MM-DD` date. Blank strings and `null` become `None`; any
/// other unparseable text is logged and dropped so the rest of the record still loads.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = clean_optional(raw) else {
        return Ok(None);
    };
    Ok(raw
        .parse::<NaiveDate>()
        .inspect_err(|e| warn!("Ignoring unparseable date of birth '{}': {}", raw, e))
        .ok())
}

impl StudentRegistration {
    /// `"<first> <last>"`, the form used for searching and name sorting.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Caller-editable fields of a [`StudentRegistration`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub course_offering_id: String,
    #[serde(default)]
    pub status: RegistrationStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
}

impl RegistrationInput {
    /// Input with the required fields set and everything else defaulted.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        course_offering_id: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            course_offering_id: course_offering_id.into(),
            ..Self::default()
        }
    }
}

impl Record for StudentRegistration {
    type Input = RegistrationInput;

    const ENTITY: &'static str = "Student registration";
    const STORAGE_KEY: &'static str = "studentRegistrations";
    const DUPLICATE_MESSAGE: &'static str =
        "This student is already registered for this course offering!";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(input: &Self::Input) -> Vec<String> {
        validation::validate_student_registration(
            &input.first_name,
            &input.last_name,
            &input.email,
            &input.course_offering_id,
        )
    }

    fn is_duplicate(existing: &[Self], input: &Self::Input) -> bool {
        let email = input.email.trim().to_lowercase();
        existing.iter().any(|r| {
            r.email.to_lowercase() == email && r.course_offering_id == input.course_offering_id
        })
    }

    fn create(id: String, now: DateTime<Utc>, input: Self::Input) -> Self {
        Self {
            id,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: clean_optional(input.phone),
            address: clean_optional(input.address),
            date_of_birth: input.date_of_birth,
            course_offering_id: input.course_offering_id,
            registered_at: now,
            status: input.status,
            payment_status: input.payment_status,
            notes: clean_optional(input.notes),
            updated_at: None,
        }
    }

    fn apply_update(&mut self, input: Self::Input, now: DateTime<Utc>) {
        self.first_name = input.first_name.trim().to_string();
        self.last_name = input.last_name.trim().to_string();
        self.email = input.email.trim().to_string();
        self.phone = clean_optional(input.phone);
        self.address = clean_optional(input.address);
        self.date_of_birth = input.date_of_birth;
        self.course_offering_id = input.course_offering_id;
        self.status = input.status;
        self.payment_status = input.payment_status;
        self.notes = clean_optional(input.notes);
        self.updated_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_legacy_record_defaults_statuses() {
        let json = r#"{
            "id": "1700000000000-abc123def",
            "firstName": "Asha",
            "lastName": "Rao",
            "email": "asha@example.com",
            "courseOfferingId": "o1",
            "registeredAt": 1700000000000
        }"#;

        let reg: StudentRegistration = serde_json::from_str(json).unwrap();
        assert_eq!(reg.status, RegistrationStatus::Active);
        assert_eq!(reg.payment_status, PaymentStatus::Pending);
        assert_eq!(reg.phone, None);
        assert_eq!(reg.full_name(), "Asha Rao");
    }

    #[test]
    fn test_date_of_birth_round_trips_and_tolerates_bad_text() {
        let mut reg = StudentRegistration::create(
            "r1".to_string(),
            Utc::now(),
            RegistrationInput::new("Asha", "Rao", "a@b.com", "o1"),
        );
        reg.date_of_birth = NaiveDate::from_ymd_opt(2001, 4, 9);

        let json = serde_json::to_string(&reg).unwrap();
        assert!(json.contains(r#""dateOfBirth":"2001-04-09""#));
        let back: StudentRegistration = serde_json::from_str(&json).unwrap();
        assert_eq!(back.date_of_birth, reg.date_of_birth);

        let garbled = json.replace("2001-04-09", "09/04/2001");
        let back: StudentRegistration = serde_json::from_str(&garbled).unwrap();
        assert_eq!(back.date_of_birth, None);
        assert_eq!(back.id, "r1");
    }

    #[test]
    fn test_create_trims_and_cleans_fields() {
        let mut input = RegistrationInput::new("  Asha ", " Rao", " asha@example.com ", "o1");
        input.phone = Some("   ".to_string());
        input.notes = Some(" prefers mornings ".to_string());

        let reg = StudentRegistration::create("r1".to_string(), Utc::now(), input);
        assert_eq!(reg.first_name, "Asha");
        assert_eq!(reg.last_name, "Rao");
        assert_eq!(reg.email, "asha@example.com");
        assert_eq!(reg.phone, None);
        assert_eq!(reg.notes.as_deref(), Some("prefers mornings"));
    }

    #[test]
    fn test_duplicate_email_is_case_insensitive() {
        let existing = vec![StudentRegistration::create(
            "r1".to_string(),
            Utc::now(),
            RegistrationInput::new("Asha", "Rao", "a@b.com", "o1"),
        )];

        let same = RegistrationInput::new("Asha", "Rao", "A@B.COM", "o1");
        let other_offering = RegistrationInput::new("Asha", "Rao", "A@B.COM", "o2");
        assert!(StudentRegistration::is_duplicate(&existing, &same));
        assert!(!StudentRegistration::is_duplicate(&existing, &other_offering));
    }

    #[test]
    fn test_status_round_trip_strings() {
        assert_eq!(
            "Withdrawn".parse::<RegistrationStatus>().unwrap(),
            RegistrationStatus::Withdrawn
        );
        assert_eq!("paid".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        assert!("refunded".parse::<PaymentStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Partial).unwrap(),
            "\"partial\""
        );
    }
}
