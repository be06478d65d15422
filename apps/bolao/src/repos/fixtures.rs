//! Fixture repository functions (generic over ConnectionTrait).

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::fixtures_sea as fixtures_adapter;
use crate::domain::fixtures::{validate_fixture_list, FixtureSpec};
use crate::entities::fixtures;
use crate::errors::domain::DomainError;

/// Fixture domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub id: i64,
    pub round_id: i64,
    /// 1-based.
    pub position: u8,
    pub home: String,
    pub away: String,
}

impl Fixture {
    pub fn spec(&self) -> FixtureSpec {
        FixtureSpec {
            home: self.home.clone(),
            away: self.away.clone(),
        }
    }
}

impl From<fixtures::Model> for Fixture {
    fn from(model: fixtures::Model) -> Self {
        Self {
            id: model.id,
            round_id: model.round_id,
            position: model.position as u8,
            home: model.home,
            away: model.away,
        }
    }
}

/// Delete the round's fixtures and insert the given 14 at positions 1..=14.
pub async fn replace_fixtures(
    txn: &DatabaseTransaction,
    round_id: i64,
    specs: &[FixtureSpec],
) -> Result<Vec<Fixture>, DomainError> {
    validate_fixture_list(specs)?;

    fixtures_adapter::delete_by_round(txn, round_id).await?;
    let rows = specs
        .iter()
        .enumerate()
        .map(|(i, spec)| fixtures_adapter::FixtureCreate {
            round_id,
            position: (i + 1) as u8,
            home: spec.home.trim().to_string(),
            away: spec.away.trim().to_string(),
        })
        .collect();
    fixtures_adapter::insert_many(txn, rows).await?;

    fixtures_of(txn, round_id).await
}

/// Fixtures of a round ordered by position
pub async fn fixtures_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<Fixture>, DomainError> {
    let rows = fixtures_adapter::find_all_by_round(conn, round_id).await?;
    Ok(rows.into_iter().map(Fixture::from).collect())
}
