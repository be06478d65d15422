use actix_web::web;

pub mod health;
pub mod webhook;

/// Register every HTTP route. `main.rs` and the tests use the same wiring.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Telegram delivery: /telegram/webhook
    cfg.service(web::scope("/telegram").configure(webhook::configure_routes));
}
