use super::{must_var, Lookup};
use crate::error::AppError;

/// Where the relational store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbProfile {
    /// PostgreSQL, credentials from `POSTGRES_*` / `APP_DB_*`.
    Postgres,
    /// SQLite database file, created on first use.
    SqliteFile { file: String },
    /// Private in-memory SQLite database; gone when the pool closes.
    InMemory,
}

impl DbProfile {
    /// Reads `DB_KIND` (`sqlite` default, `postgres`, `memory`) and `DB_PATH`.
    pub fn from_lookup(lookup: &impl Lookup) -> Result<Self, AppError> {
        let kind = lookup("DB_KIND").unwrap_or_else(|| "sqlite".to_string());
        match kind.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(DbProfile::SqliteFile {
                file: lookup("DB_PATH").unwrap_or_else(|| "palpites_v2.db".to_string()),
            }),
            "postgres" | "postgresql" => Ok(DbProfile::Postgres),
            "memory" => Ok(DbProfile::InMemory),
            other => Err(AppError::config(format!(
                "Unknown DB_KIND '{other}'. Use: sqlite | postgres | memory"
            ))),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(&super::env_lookup)
    }

    pub fn is_sqlite(&self) -> bool {
        !matches!(self, DbProfile::Postgres)
    }
}

/// Builds the connection URL for a profile.
pub fn db_url(profile: &DbProfile, lookup: &impl Lookup) -> Result<String, AppError> {
    match profile {
        DbProfile::Postgres => {
            let host = lookup("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string());
            let port = lookup("POSTGRES_PORT").unwrap_or_else(|| "5432".to_string());
            let db_name = must_var(lookup, "PROD_DB")?;
            let username = must_var(lookup, "APP_DB_USER")?;
            let password = must_var(lookup, "APP_DB_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbProfile::SqliteFile { file } => {
            if file.trim().is_empty() {
                return Err(AppError::config("DB_PATH must not be empty"));
            }
            Ok(format!("sqlite://{file}?mode=rwc"))
        }
        DbProfile::InMemory => Ok("sqlite::memory:".to_string()),
    }
}
