//! CSV export of query results.
//!
//! Fields are joined with `,` and rows with `\n`. Values are written as-is with no
//! quoting, so a value containing a comma shifts the columns after it; projections
//! used here avoid producing commas where they control the text.

use crate::{
    core::{format::format_export_date, resolver::Resolver},
    errors::Result,
    models::StudentRegistration,
};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

/// Placeholder written for absent optional fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// One output column: a header and how to project a record into it.
pub struct Column<'a, T> {
    pub header: &'static str,
    project: Box<dyn Fn(&T) -> String + 'a>,
}

impl<'a, T> Column<'a, T> {
    pub fn new<F>(header: &'static str, project: F) -> Self
    where
        F: Fn(&T) -> String + 'a,
    {
        Self {
            header,
            project: Box::new(project),
        }
    }
}

/// Renders a header row followed by one row per record, in input order.
#[must_use]
pub fn to_csv<T>(rows: &[&T], columns: &[Column<'_, T>]) -> String {
    let header = columns
        .iter()
        .map(|c| c.header)
        .collect::<Vec<_>>()
        .join(",");

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(header);
    for row in rows {
        let fields: Vec<String> = columns.iter().map(|c| (c.project)(*row)).collect();
        lines.push(fields.join(","));
    }
    lines.join("\n")
}

/// Columns of the student registration export.
#[must_use]
pub fn registration_columns(resolver: Resolver<'_>) -> Vec<Column<'_, StudentRegistration>> {
    vec![
        Column::new("First Name", |r: &StudentRegistration| r.first_name.clone()),
        Column::new("Last Name", |r: &StudentRegistration| r.last_name.clone()),
        Column::new("Email", |r: &StudentRegistration| r.email.clone()),
        Column::new("Phone", |r: &StudentRegistration| {
            r.phone.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string())
        }),
        Column::new("Course Type", move |r: &StudentRegistration| {
            resolver.offering_details(&r.course_offering_id).course_type_name
        }),
        Column::new("Course", move |r: &StudentRegistration| {
            resolver.offering_details(&r.course_offering_id).course_name
        }),
        Column::new("Status", |r: &StudentRegistration| r.status.to_string()),
        Column::new("Payment Status", |r: &StudentRegistration| {
            r.payment_status.to_string()
        }),
        Column::new("Registered At", |r: &StudentRegistration| {
            format_export_date(r.registered_at)
        }),
    ]
}

/// Renders registrations (typically a query result) with [`registration_columns`].
#[must_use]
pub fn export_registrations(rows: &[&StudentRegistration], resolver: Resolver<'_>) -> String {
    to_csv(rows, &registration_columns(resolver))
}

/// `student-registrations-<epoch-millis>.csv`
#[must_use]
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("student-registrations-{}.csv", now.timestamp_millis())
}

/// Writes `contents` to `dir/file_name`, creating `dir` if needed.
///
/// # Errors
/// Returns an error if the directory cannot be created or the file cannot be written.
pub fn write_csv_file(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, contents)?;
    info!("Wrote CSV export to {}", path.display());
    Ok(path)
}
