//! In-memory draft picks for the current round.
//!
//! Nothing here is persisted; a restart loses every draft.

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::domain::draft::{check_fixture_index, CompletionStatus, Draft};
use crate::domain::pick::Pick;
use crate::errors::domain::{DomainError, ValidationKind};

/// Per-participant drafts keyed by participant id.
///
/// Lock order is always `current_round` then the map shard, and no guard is
/// held across an `.await` (every method is synchronous and returns clones).
#[derive(Debug, Default)]
pub struct DraftTracker {
    current_round: RwLock<Option<i64>>,
    drafts: DashMap<i64, Draft>,
}

impl DraftTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_round(&self) -> Option<i64> {
        *self.current_round.read()
    }

    /// Drop every draft and start tracking `round_id`.
    pub fn reset_all(&self, round_id: i64) {
        let mut current = self.current_round.write();
        let dropped = self.drafts.len();
        self.drafts.clear();
        *current = Some(round_id);
        debug!(round_id, dropped, "drafts reset");
    }

    /// Adopt `round_id` if it is newer than the tracked one (e.g. after a
    /// restart). Returns true when drafts were reset. Round ids only grow, so
    /// an older id comes from an event that read the round before it closed.
    pub fn ensure_round(&self, round_id: i64) -> Result<bool, DomainError> {
        if self.current_round() == Some(round_id) {
            return Ok(false);
        }
        let mut current = self.current_round.write();
        match *current {
            Some(tracked) if tracked == round_id => return Ok(false),
            Some(tracked) if tracked > round_id => {
                return Err(DomainError::validation(
                    ValidationKind::StaleRound,
                    format!("round {round_id} was superseded by round {tracked}"),
                ));
            }
            _ => {}
        }
        self.drafts.clear();
        *current = Some(round_id);
        debug!(round_id, "draft tracker adopted round");
        Ok(true)
    }

    /// Existing draft or a fresh all-unset one for the current round.
    pub fn get_or_create(&self, participant_id: i64) -> Result<Draft, DomainError> {
        let current = self.current_round.read();
        let round_id = (*current).ok_or_else(DomainError::no_active_round)?;
        let draft = self
            .drafts
            .entry(participant_id)
            .or_insert_with(|| Draft::new(round_id))
            .value()
            .clone();
        Ok(draft)
    }

    /// Overwrite one slot, creating the draft if needed. Returns the updated draft.
    pub fn set_pick(
        &self,
        participant_id: i64,
        fixture_index: usize,
        pick: Pick,
    ) -> Result<Draft, DomainError> {
        check_fixture_index(fixture_index)?;
        let current = self.current_round.read();
        let round_id = (*current).ok_or_else(DomainError::no_active_round)?;
        let mut entry = self
            .drafts
            .entry(participant_id)
            .or_insert_with(|| Draft::new(round_id));
        entry.set(fixture_index, pick)?;
        Ok(entry.value().clone())
    }

    pub fn discard(&self, participant_id: i64) -> Option<Draft> {
        self.drafts.remove(&participant_id).map(|(_, d)| d)
    }

    /// Unknown participants report all 14 fixtures missing.
    pub fn completion_status(&self, participant_id: i64) -> CompletionStatus {
        self.drafts
            .get(&participant_id)
            .map(|d| d.completion())
            .unwrap_or_else(CompletionStatus::all_missing)
    }

    /// Draft without creating one.
    pub fn peek(&self, participant_id: i64) -> Option<Draft> {
        self.drafts.get(&participant_id).map(|d| d.value().clone())
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}
