use std::sync::Arc;

use crate::config::bot::BotConfig;
use crate::config::db::DbProfile;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::transport::telegram::TelegramClient;
use crate::transport::ChatTransport;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    db_profile: DbProfile,
    config: Option<BotConfig>,
    transport: Option<Arc<dyn ChatTransport>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_profile: DbProfile::InMemory,
            config: None,
            transport: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = profile;
        self
    }

    pub fn with_config(mut self, config: BotConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the Telegram client built from the config.
    pub fn with_transport(mut self, transport: Arc<dyn ChatTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let config = self
            .config
            .ok_or_else(|| AppError::config("bot configuration not provided"))?;

        let transport: Arc<dyn ChatTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                TelegramClient::new(&config.api_base, &config.token)
                    .map_err(|e| AppError::config(format!("telegram client: {e}")))?,
            ),
        };

        // single entrypoint: build + migrate
        let conn = bootstrap_db(&self.db_profile).await?;
        Ok(AppState::new(conn, config, transport))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
