//! Domain-level error type used across services, repos and the bot dispatcher.
//!
//! This error type is HTTP- and DB-agnostic. The webhook boundary converts it
//! into `crate::error::AppError`; the bot turns it into a chat reply.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Which rule a validation failure broke.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Fixture list does not have exactly 14 entries.
    FixtureCount,
    /// A fixture entry is not of the form "Home x Away".
    FixtureFormat,
    /// A fixture label is empty after trimming.
    EmptyLabel,
    /// Round name is empty after trimming.
    EmptyRoundName,
    FixtureIndexOutOfRange,
    InvalidPick,
    /// Draft belongs to a round that is no longer current.
    StaleRound,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Round,
    Submission,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Participant already has a stored submission for the round.
    DuplicateSubmission,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Submission attempted with unset picks; holds 0-based fixture indices.
    IncompleteDraft(Vec<usize>),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::IncompleteDraft(missing) => {
                write!(f, "incomplete draft: {} fixture(s) missing", missing.len())
            }
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn incomplete(missing: Vec<usize>) -> Self {
        Self::IncompleteDraft(missing)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    pub fn no_active_round() -> Self {
        Self::NotFound(NotFoundKind::Round, "no active round".into())
    }

    pub fn is_duplicate_submission(&self) -> bool {
        matches!(self, Self::Conflict(ConflictKind::DuplicateSubmission, _))
    }

    /// Missing fixture indices when this is an `IncompleteDraft`.
    pub fn missing_fixtures(&self) -> Option<&[usize]> {
        match self {
            Self::IncompleteDraft(missing) => Some(missing),
            _ => None,
        }
    }
}
