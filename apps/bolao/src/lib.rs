#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod bot;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;
pub mod transport;

// Re-exports for public API
pub use bot::Bot;
pub use config::bot::BotConfig;
pub use config::db::{db_url, DbProfile};
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    bolao_test_support::logging::init();
}
