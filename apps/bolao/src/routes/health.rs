use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    app_version: String,
    db: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    migrations: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    active_round: Option<i64>,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let app_version = env!("CARGO_PKG_VERSION").to_string();
    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let db = &app_state.db;
    let (db_status, db_error, migrations) = match db
        .query_one(sea_orm::Statement::from_string(
            db.get_database_backend(),
            "SELECT 1 as health_check".to_string(),
        ))
        .await
    {
        Ok(_) => {
            let migration_version = match get_latest_migration_version(db).await {
                Ok(Some(version)) => version,
                Ok(None) => "no_migrations".to_string(),
                Err(_) => "unknown".to_string(),
            };
            ("ok".to_string(), None, migration_version)
        }
        Err(e) => (
            "error".to_string(),
            Some(format!("DB query failed: {e}")),
            "unknown".to_string(),
        ),
    };

    let response = HealthResponse {
        status: "ok".to_string(),
        app_version,
        db: db_status,
        db_error,
        migrations,
        active_round: app_state.drafts.current_round(),
        time,
    };

    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}
