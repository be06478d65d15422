use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;

use crate::bot::flows::AdminFlows;
use crate::config::bot::BotConfig;
use crate::services::{
    AggregationService, BroadcastSlot, DraftTracker, RoundManager, SubmissionService,
};
use crate::transport::ChatTransport;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<BotConfig>,
    pub transport: Arc<dyn ChatTransport>,
    /// Transient per-participant picks for the current round
    pub drafts: Arc<DraftTracker>,
    /// The shared grid message of the current round
    pub broadcast: Arc<BroadcastSlot>,
    pub flows: Arc<AdminFlows>,
    /// Held for the whole handling of one update
    pub dispatch: Arc<Mutex<()>>,
}

impl AppState {
    /// Fresh transient state around an existing connection and transport.
    pub fn new(
        db: DatabaseConnection,
        config: BotConfig,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            transport,
            drafts: Arc::new(DraftTracker::new()),
            broadcast: Arc::new(BroadcastSlot::new()),
            flows: Arc::new(AdminFlows::new()),
            dispatch: Arc::new(Mutex::new(())),
        }
    }

    pub fn round_manager(&self) -> RoundManager {
        RoundManager::new(self.drafts.clone(), self.broadcast.clone())
    }

    pub fn submission_service(&self) -> SubmissionService {
        SubmissionService::new(self.drafts.clone())
    }

    pub fn aggregation(&self) -> AggregationService {
        AggregationService::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("current_round", &self.drafts.current_round())
            .field("drafts", &self.drafts.len())
            .finish_non_exhaustive()
    }
}
