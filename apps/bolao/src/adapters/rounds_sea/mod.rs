//! SeaORM adapter for rounds repository.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::rounds;

pub mod dto;

pub use dto::RoundCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find_by_id(round_id).one(conn).await
}

/// Most recently created active round
pub async fn find_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::Active.eq(true))
        .order_by_desc(rounds::Column::Id)
        .one(conn)
        .await
}

/// Flip every active round to inactive; returns how many were touched.
pub async fn deactivate_all(txn: &DatabaseTransaction) -> Result<u64, sea_orm::DbErr> {
    let result = rounds::Entity::update_many()
        .col_expr(rounds::Column::Active, Expr::value(false))
        .filter(rounds::Column::Active.eq(true))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}

/// Insert a new active round. Callers deactivate the previous one first.
pub async fn create_round(
    txn: &DatabaseTransaction,
    dto: RoundCreate,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let round = rounds::ActiveModel {
        id: sea_orm::NotSet,
        name: Set(dto.name),
        active: Set(true),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    round.insert(txn).await
}
