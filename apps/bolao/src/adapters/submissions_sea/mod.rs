//! SeaORM adapter for submissions repository.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::submissions;

pub mod dto;

pub use dto::SubmissionCreate;

fn active_model(dto: SubmissionCreate) -> submissions::ActiveModel {
    submissions::ActiveModel {
        id: sea_orm::NotSet,
        round_id: Set(dto.round_id),
        participant_id: Set(dto.participant_id),
        display_name: Set(dto.display_name),
        handle: Set(dto.handle),
        picks_json: Set(serde_json::Value::from(dto.picks)),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
}

pub async fn find_by_round_and_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    participant_id: i64,
) -> Result<Option<submissions::Model>, sea_orm::DbErr> {
    submissions::Entity::find()
        .filter(submissions::Column::RoundId.eq(round_id))
        .filter(submissions::Column::ParticipantId.eq(participant_id))
        .one(conn)
        .await
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    participant_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let count = submissions::Entity::find()
        .filter(submissions::Column::RoundId.eq(round_id))
        .filter(submissions::Column::ParticipantId.eq(participant_id))
        .count(conn)
        .await?;
    Ok(count > 0)
}

/// Plain insert; fails on the (round_id, participant_id) unique index.
pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SubmissionCreate,
) -> Result<submissions::Model, sea_orm::DbErr> {
    active_model(dto).insert(conn).await
}

/// Insert or overwrite picks/name/handle for the (round_id, participant_id) key.
/// `created_at` keeps the first write.
pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SubmissionCreate,
) -> Result<submissions::Model, sea_orm::DbErr> {
    let (round_id, participant_id) = (dto.round_id, dto.participant_id);

    submissions::Entity::insert(active_model(dto))
        .on_conflict(
            OnConflict::columns([
                submissions::Column::RoundId,
                submissions::Column::ParticipantId,
            ])
            .update_columns([
                submissions::Column::DisplayName,
                submissions::Column::Handle,
                submissions::Column::PicksJson,
            ])
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    find_by_round_and_participant(conn, round_id, participant_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Submission not found after upsert".into()))
}

/// All submissions of a round, oldest first
pub async fn find_all_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<submissions::Model>, sea_orm::DbErr> {
    submissions::Entity::find()
        .filter(submissions::Column::RoundId.eq(round_id))
        .order_by_asc(submissions::Column::CreatedAt)
        .order_by_asc(submissions::Column::Id)
        .all(conn)
        .await
}

pub async fn count_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    submissions::Entity::find()
        .filter(submissions::Column::RoundId.eq(round_id))
        .count(conn)
        .await
}
