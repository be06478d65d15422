use actix_web::{web, HttpRequest, HttpResponse};
use tracing::debug;

use crate::bot::Bot;
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::transport::types::Update;

pub const SECRET_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

fn check_secret(req: &HttpRequest, expected: Option<&str>) -> Result<(), AppError> {
    let Some(expected) = expected else {
        return Ok(());
    };
    let provided = req
        .headers()
        .get(SECRET_HEADER)
        .and_then(|v| v.to_str().ok());
    match provided {
        Some(provided) if secrets_match(provided.as_bytes(), expected.as_bytes()) => Ok(()),
        _ => Err(AppError::unauthorized()),
    }
}

/// Compares every byte regardless of where the first mismatch is.
fn secrets_match(provided: &[u8], expected: &[u8]) -> bool {
    if provided.len() != expected.len() {
        return false;
    }
    provided
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Telegram pushes one update per request. The update is fully handled
/// before the 200 is returned; handling failures are logged, not surfaced.
async fn receive(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    update: web::Json<Update>,
) -> Result<HttpResponse, AppError> {
    check_secret(&req, app_state.config.webhook_secret.as_deref())?;

    let update = update.into_inner();
    debug!(update_id = update.update_id, "webhook update");
    Bot::new(app_state.get_ref().clone())
        .handle_update(update)
        .await;

    Ok(HttpResponse::Ok().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/webhook", web::post().to(receive));
}
