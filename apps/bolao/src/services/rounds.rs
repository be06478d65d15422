//! Round lifecycle: opening a round and reading the active one.

use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::info;

use super::broadcast::BroadcastSlot;
use super::drafts::DraftTracker;
use crate::domain::fixtures::{normalize_round_name, validate_fixture_list, FixtureSpec};
use crate::errors::domain::DomainError;
use crate::repos::fixtures::{self as fixtures_repo, Fixture};
use crate::repos::rounds::{self as rounds_repo, Round};

/// A round together with its 14 fixtures in position order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRound {
    pub round: Round,
    pub fixtures: Vec<Fixture>,
}

impl ActiveRound {
    pub fn fixture_specs(&self) -> Vec<FixtureSpec> {
        self.fixtures.iter().map(Fixture::spec).collect()
    }
}

pub struct RoundManager {
    drafts: Arc<DraftTracker>,
    broadcast: Arc<BroadcastSlot>,
}

impl RoundManager {
    pub fn new(drafts: Arc<DraftTracker>, broadcast: Arc<BroadcastSlot>) -> Self {
        Self { drafts, broadcast }
    }

    /// Create a round with its fixtures and make it the only active one.
    ///
    /// Round row and fixtures commit in one transaction. Drafts and the
    /// broadcast reference are reset only after the commit succeeds.
    pub async fn open_round(
        &self,
        db: &DatabaseConnection,
        name: &str,
        fixtures: Vec<FixtureSpec>,
    ) -> Result<ActiveRound, DomainError> {
        let name = normalize_round_name(name)?;
        validate_fixture_list(&fixtures)?;

        let txn = db.begin().await?;
        let round = rounds_repo::create_round(&txn, &name).await?;
        let stored = fixtures_repo::replace_fixtures(&txn, round.id, &fixtures).await?;
        txn.commit().await?;

        self.drafts.reset_all(round.id);
        self.broadcast.clear();

        info!(round_id = round.id, fixtures = stored.len(), "round opened");
        Ok(ActiveRound {
            round,
            fixtures: stored,
        })
    }

    pub async fn active_round<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Option<ActiveRound>, DomainError> {
        let Some(round) = rounds_repo::active_round(conn).await? else {
            return Ok(None);
        };
        let fixtures = fixtures_repo::fixtures_of(conn, round.id).await?;
        Ok(Some(ActiveRound { round, fixtures }))
    }

    /// Active round or `NotFound(Round)`.
    pub async fn require_active<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<ActiveRound, DomainError> {
        self.active_round(conn)
            .await?
            .ok_or_else(DomainError::no_active_round)
    }
}
