//! Round repository functions (generic over ConnectionTrait).

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::debug;

use crate::adapters::rounds_sea as rounds_adapter;
use crate::entities::rounds;
use crate::errors::domain::DomainError;

/// Round domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub created_at: time::OffsetDateTime,
}

impl From<rounds::Model> for Round {
    fn from(model: rounds::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            active: model.active,
            created_at: model.created_at,
        }
    }
}

/// Deactivate every round and insert `name` as the new active one.
///
/// Takes a transaction so the flip and the insert commit together.
pub async fn create_round(txn: &DatabaseTransaction, name: &str) -> Result<Round, DomainError> {
    let deactivated = rounds_adapter::deactivate_all(txn).await?;
    let round = rounds_adapter::create_round(txn, rounds_adapter::RoundCreate::new(name)).await?;
    debug!(round_id = round.id, deactivated, "round row inserted");
    Ok(Round::from(round))
}

pub async fn active_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<Round>, DomainError> {
    let round = rounds_adapter::find_active(conn).await?;
    Ok(round.map(Round::from))
}

pub async fn find_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<Round>, DomainError> {
    let round = rounds_adapter::find_by_id(conn, round_id).await?;
    Ok(round.map(Round::from))
}
