//! Submission repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::submissions_sea as submissions_adapter;
use crate::domain::pick::{picks_from_strings, picks_to_strings, Picks};
use crate::entities::submissions;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Submission domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: i64,
    pub round_id: i64,
    pub participant_id: i64,
    pub display_name: String,
    pub handle: Option<String>,
    pub picks: Picks,
    pub created_at: time::OffsetDateTime,
}

/// Fields needed to store a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub round_id: i64,
    pub participant_id: i64,
    pub display_name: String,
    pub handle: Option<String>,
    pub picks: Picks,
}

impl From<NewSubmission> for submissions_adapter::SubmissionCreate {
    fn from(s: NewSubmission) -> Self {
        Self {
            round_id: s.round_id,
            participant_id: s.participant_id,
            display_name: s.display_name,
            handle: s.handle,
            picks: picks_to_strings(&s.picks),
        }
    }
}

impl TryFrom<submissions::Model> for Submission {
    type Error = DomainError;

    fn try_from(model: submissions::Model) -> Result<Self, Self::Error> {
        let corrupt = |detail: String| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("submission {}: {detail}", model.id),
            )
        };
        let raw: Vec<String> = serde_json::from_value(model.picks_json.clone())
            .map_err(|e| corrupt(format!("picks_json is not a string list: {e}")))?;
        let picks = picks_from_strings(&raw).map_err(|e| corrupt(e.to_string()))?;

        Ok(Self {
            id: model.id,
            round_id: model.round_id,
            participant_id: model.participant_id,
            display_name: model.display_name,
            handle: model.handle,
            picks,
            created_at: model.created_at,
        })
    }
}

pub async fn has_submission<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    participant_id: i64,
) -> Result<bool, DomainError> {
    Ok(submissions_adapter::exists(conn, round_id, participant_id).await?)
}

/// Idempotent upsert keyed by (round_id, participant_id).
pub async fn save_submission<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    submission: NewSubmission,
) -> Result<Submission, DomainError> {
    let model = submissions_adapter::upsert(conn, submission.into()).await?;
    Submission::try_from(model)
}

/// Strict insert; a second row for the same key is `Conflict(DuplicateSubmission)`.
pub async fn insert_submission<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    submission: NewSubmission,
) -> Result<Submission, DomainError> {
    let model = submissions_adapter::insert(conn, submission.into()).await?;
    Submission::try_from(model)
}

pub async fn find_submission<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    participant_id: i64,
) -> Result<Option<Submission>, DomainError> {
    submissions_adapter::find_by_round_and_participant(conn, round_id, participant_id)
        .await?
        .map(Submission::try_from)
        .transpose()
}

/// Submissions of a round, oldest first
pub async fn submissions_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<Submission>, DomainError> {
    submissions_adapter::find_all_by_round(conn, round_id)
        .await?
        .into_iter()
        .map(Submission::try_from)
        .collect()
}

pub async fn count_submissions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, DomainError> {
    Ok(submissions_adapter::count_by_round(conn, round_id).await?)
}
