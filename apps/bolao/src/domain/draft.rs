use super::pick::{Pick, Picks};
use super::FIXTURE_COUNT;
use crate::errors::domain::{DomainError, ValidationKind};

/// A participant's unsubmitted picks for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    round_id: i64,
    slots: [Option<Pick>; FIXTURE_COUNT],
}

/// Whether a draft can be submitted, and if not which fixtures are missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionStatus {
    pub is_complete: bool,
    /// 0-based, ascending.
    pub missing: Vec<usize>,
}

impl CompletionStatus {
    pub fn all_missing() -> Self {
        Self {
            is_complete: false,
            missing: (0..FIXTURE_COUNT).collect(),
        }
    }
}

pub fn check_fixture_index(index: usize) -> Result<(), DomainError> {
    if index >= FIXTURE_COUNT {
        return Err(DomainError::validation(
            ValidationKind::FixtureIndexOutOfRange,
            format!("fixture index {index} outside 0..{FIXTURE_COUNT}"),
        ));
    }
    Ok(())
}

impl Draft {
    pub fn new(round_id: i64) -> Self {
        Self {
            round_id,
            slots: [None; FIXTURE_COUNT],
        }
    }

    pub fn round_id(&self) -> i64 {
        self.round_id
    }

    pub fn slots(&self) -> &[Option<Pick>; FIXTURE_COUNT] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<Pick> {
        self.slots.get(index).copied().flatten()
    }

    /// Overwrites the slot; last write wins.
    pub fn set(&mut self, index: usize, pick: Pick) -> Result<(), DomainError> {
        check_fixture_index(index)?;
        self.slots[index] = Some(pick);
        Ok(())
    }

    pub fn missing(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.is_none().then_some(i))
            .collect()
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn completion(&self) -> CompletionStatus {
        let missing = self.missing();
        CompletionStatus {
            is_complete: missing.is_empty(),
            missing,
        }
    }

    /// Finalized picks, or `IncompleteDraft` listing the unset slots.
    pub fn finalize(&self) -> Result<Picks, DomainError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(DomainError::incomplete(missing));
        }
        let mut picks = [Pick::Home; FIXTURE_COUNT];
        for (out, slot) in picks.iter_mut().zip(self.slots.iter()) {
            if let Some(p) = slot {
                *out = *p;
            }
        }
        Ok(picks)
    }
}
