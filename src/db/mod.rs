pub mod entities;
pub mod services;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use tracing::{error, info};

const INITIAL_MIGRATION: &str =
    include_str!("../../migrations/20250601000000_create_parking_tables.sql");

/// Opens (and creates if missing) the SQLite store at `database_path`.
pub async fn connect(database_path: &str) -> Result<DatabaseConnection, DbErr> {
    let database_url = format!("sqlite://{database_path}?mode=rwc");
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(5)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    info!(path = %database_path, "Opening parking store.");
    Database::connect(opt).await
}

/// Creates the schema if absent and seeds `total_slots` empty slots on a fresh
/// store. Returns the number of slots seeded, which is zero on every start
/// after the first.
pub async fn initialize(db: &DatabaseConnection, total_slots: i32) -> Result<u64, DbErr> {
    run_migrations(db).await?;
    let seeded = services::slot_service::seed_slots(db, total_slots).await?;
    if seeded > 0 {
        info!(count = seeded, "Seeded parking slots on a fresh store.");
    } else {
        info!("Slots already present, skipping seeding.");
    }
    Ok(seeded)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    info!("Running store migrations...");
    for statement in INITIAL_MIGRATION
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        db.execute_unprepared(statement).await.map_err(|e| {
            error!(error = %e, "Failed to execute migration statement.");
            e
        })?;
    }
    info!("Store migrations completed successfully.");
    Ok(())
}
