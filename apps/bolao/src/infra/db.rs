use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbProfile};
use crate::config::env_lookup;
use crate::error::AppError;

const MEMORY_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24);

fn connect_options(profile: &DbProfile, url: String) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10));

    match profile {
        // Every SQLite connection to ":memory:" is a separate database, so the
        // pool must hold exactly one connection and never recycle it.
        DbProfile::InMemory => {
            opts.max_connections(1)
                .min_connections(1)
                .idle_timeout(MEMORY_LIFETIME)
                .max_lifetime(MEMORY_LIFETIME);
        }
        // Single writer; avoids SQLITE_BUSY under concurrent updates.
        DbProfile::SqliteFile { .. } => {
            opts.max_connections(1).min_connections(1);
        }
        DbProfile::Postgres => {
            opts.max_connections(10).min_connections(1);
        }
    }
    opts
}

/// Opens a pool for the profile. Does NOT run migrations.
pub async fn connect_db(profile: &DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile, &env_lookup)?;
    let conn = Database::connect(connect_options(profile, url))
        .await
        .map_err(|e| AppError::db_unavailable(format!("connect failed: {e}")))?;
    Ok(conn)
}

/// Opens a pool and brings the schema up to date.
pub async fn bootstrap_db(profile: &DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile).await?;
    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("migrations failed: {e}")))?;
    info!(profile = ?profile, "database ready");
    Ok(conn)
}
