//! Turning a complete draft into a stored, immutable submission.

use std::sync::Arc;

use sea_orm::ConnectionTrait;
use tracing::{info, warn};

use super::drafts::DraftTracker;
use crate::domain::draft::{CompletionStatus, Draft};
use crate::domain::pick::Picks;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::logging::pii::MaskedName;
use crate::repos::submissions::{self as submissions_repo, NewSubmission};

/// Who is submitting, as reported by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: i64,
    pub display_name: String,
    pub handle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub round_id: i64,
    pub participant_id: i64,
    pub picks: Picks,
}

pub struct SubmissionService {
    drafts: Arc<DraftTracker>,
}

impl SubmissionService {
    pub fn new(drafts: Arc<DraftTracker>) -> Self {
        Self { drafts }
    }

    /// Persist the participant's draft for `round_id`.
    ///
    /// The draft survives every failure path; it is discarded only after the
    /// row is stored.
    pub async fn submit<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i64,
        participant: &Participant,
    ) -> Result<SubmissionResult, DomainError> {
        if self.drafts.current_round() != Some(round_id) {
            return Err(DomainError::validation(
                ValidationKind::StaleRound,
                format!("round {round_id} is not the current round"),
            ));
        }

        // Never create a draft here; a missing one is simply all-unset.
        let draft = self
            .drafts
            .peek(participant.id)
            .unwrap_or_else(|| Draft::new(round_id));
        if draft.round_id() != round_id {
            return Err(DomainError::validation(
                ValidationKind::StaleRound,
                format!("draft belongs to round {}", draft.round_id()),
            ));
        }
        let picks = draft.finalize()?;

        if submissions_repo::has_submission(conn, round_id, participant.id).await? {
            return Err(duplicate(round_id, participant.id));
        }

        let new = NewSubmission {
            round_id,
            participant_id: participant.id,
            display_name: participant.display_name.clone(),
            handle: participant.handle.clone(),
            picks,
        };
        match submissions_repo::insert_submission(conn, new).await {
            Ok(stored) => {
                self.drafts.discard(participant.id);
                info!(
                    round_id,
                    participant_id = participant.id,
                    submission_id = stored.id,
                    name = %MaskedName(&participant.display_name),
                    "submission stored"
                );
                Ok(SubmissionResult {
                    round_id,
                    participant_id: participant.id,
                    picks: stored.picks,
                })
            }
            Err(e) if e.is_duplicate_submission() => {
                warn!(round_id, participant_id = participant.id, "lost submission race");
                Err(duplicate(round_id, participant.id))
            }
            Err(e) => Err(e),
        }
    }

    pub fn completion_status(&self, participant_id: i64) -> CompletionStatus {
        self.drafts.completion_status(participant_id)
    }
}

fn duplicate(round_id: i64, participant_id: i64) -> DomainError {
    DomainError::conflict(
        ConflictKind::DuplicateSubmission,
        format!("participant {participant_id} already submitted for round {round_id}"),
    )
}
