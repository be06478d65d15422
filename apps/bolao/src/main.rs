use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use bolao::bot::polling;
use bolao::config::bot::{BotConfig, DeliveryMode};
use bolao::config::db::DbProfile;
use bolao::infra::state::build_state;
use bolao::middleware::RequestTrace;
use bolao::transport::telegram::TelegramClient;
use bolao::{routes, telemetry, Bot};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker-compose env_file, or `set -a; . ./.env; set +a` locally).
    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let profile = match DbProfile::from_env() {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let client = match TelegramClient::new(&config.api_base, &config.token) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Failed to build Telegram client: {e}");
            std::process::exit(1);
        }
    };

    let mode = config.mode;
    let host = config.bind_host.clone();
    let port = config.bind_port;

    let app_state = match build_state()
        .with_db(profile)
        .with_config(config)
        .with_transport(Arc::new(client.clone()))
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(?mode, "bolão bot started");

    match mode {
        DeliveryMode::Polling => {
            let bot = Bot::new(app_state);
            tokio::select! {
                _ = polling::run(bot, &client) => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutdown requested");
                }
            }
            Ok(())
        }
        DeliveryMode::Webhook => {
            println!("🚀 Listening for Telegram webhooks on http://{host}:{port}");
            let data = web::Data::new(app_state);
            HttpServer::new(move || {
                App::new()
                    .wrap(RequestTrace)
                    .app_data(data.clone())
                    .configure(routes::configure)
            })
            .bind((host.as_str(), port))?
            .run()
            .await
        }
    }
}
