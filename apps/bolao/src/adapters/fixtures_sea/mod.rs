//! SeaORM adapter for fixtures repository.

use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::fixtures;

pub mod dto;

pub use dto::FixtureCreate;

pub async fn delete_by_round(
    txn: &DatabaseTransaction,
    round_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = fixtures::Entity::delete_many()
        .filter(fixtures::Column::RoundId.eq(round_id))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn insert_many(
    txn: &DatabaseTransaction,
    rows: Vec<FixtureCreate>,
) -> Result<(), sea_orm::DbErr> {
    if rows.is_empty() {
        return Ok(());
    }
    let now = time::OffsetDateTime::now_utc();
    let models = rows.into_iter().map(|dto| fixtures::ActiveModel {
        id: sea_orm::NotSet,
        round_id: Set(dto.round_id),
        position: Set(dto.position as i16),
        home: Set(dto.home),
        away: Set(dto.away),
        created_at: Set(now),
    });

    fixtures::Entity::insert_many(models)
        .exec_without_returning(txn)
        .await?;
    Ok(())
}

/// All fixtures of a round ordered by position
pub async fn find_all_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<fixtures::Model>, sea_orm::DbErr> {
    fixtures::Entity::find()
        .filter(fixtures::Column::RoundId.eq(round_id))
        .order_by_asc(fixtures::Column::Position)
        .all(conn)
        .await
}
