//! Per-fixture pick distribution for the active round.

use sea_orm::ConnectionTrait;

use crate::domain::fixtures::FixtureSpec;
use crate::domain::pick::Picks;
use crate::domain::statistics::{summarize, RoundStatistics};
use crate::errors::domain::DomainError;
use crate::repos::fixtures::{self as fixtures_repo, Fixture};
use crate::repos::submissions as submissions_repo;

/// Recomputes pick distribution from the store on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// `None` when the round has no submissions yet.
    pub async fn statistics<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i64,
    ) -> Result<Option<RoundStatistics>, DomainError> {
        let submissions = submissions_repo::submissions_of(conn, round_id).await?;
        if submissions.is_empty() {
            return Ok(None);
        }
        let fixtures: Vec<FixtureSpec> = fixtures_repo::fixtures_of(conn, round_id)
            .await?
            .iter()
            .map(Fixture::spec)
            .collect();
        let picks: Vec<Picks> = submissions.iter().map(|s| s.picks).collect();

        Ok(summarize(round_id, &fixtures, &picks))
    }
}
