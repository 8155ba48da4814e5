use course_registry::{
    config::{self, database},
    core::{AppState, RegistrationQuery, csv, id},
    errors::Result,
    storage::SqliteStorage,
};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();

    // 3. Load settings
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!("Using storage at {}", app_config.storage.database_url);

    // 4. Open storage and load every collection
    database::ensure_sqlite_parent_dir(&app_config.storage.database_url)?;
    let storage = SqliteStorage::open(&app_config.storage.database_url)
        .inspect_err(|e| error!("Failed to open storage: {}", e))?;
    let state = AppState::load(Arc::new(storage));

    // 5. Summarize
    let stats = state.registration_stats();
    info!(
        "{} student(s) across {} offering(s), {} per offering on average",
        stats.total_students,
        stats.unique_offerings,
        stats.average_display()
    );
    for (status, count) in &stats.by_status {
        info!("  status {}: {}", status, count);
    }
    for (status, count) in &stats.by_payment_status {
        info!("  payment {}: {}", status, count);
    }
    for group in &stats.by_offering {
        info!("  {}: {}", group.label, group.count);
    }

    // 6. Export registrations, newest first
    if state.registrations().is_empty() {
        info!("No student registrations to export.");
        return Ok(());
    }
    let contents = state.export_registrations_csv(&RegistrationQuery::default());
    csv::write_csv_file(
        &app_config.export.directory,
        &csv::export_file_name(id::now()),
        &contents,
    )?;

    Ok(())
}
