//! SeaORM -> DomainError translation.
//!
//! Adapters return `sea_orm::DbErr`; repos convert here (directly or through
//! the `From` impl below) so services only ever see `DomainError`.

use sea_orm::DbErr;
use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Constraint markers as they appear in PostgreSQL (index name) and SQLite
/// (`table.column` list) unique-violation messages.
const UNIQUE_MARKERS: &[(&str, ConflictTarget)] = &[
    ("ux_submissions_round_participant", ConflictTarget::Submission),
    (
        "submissions.round_id, submissions.participant_id",
        ConflictTarget::Submission,
    ),
    ("ux_fixtures_round_position", ConflictTarget::FixturePosition),
    (
        "fixtures.round_id, fixtures.position",
        ConflictTarget::FixturePosition,
    ),
];

#[derive(Debug, Clone, Copy)]
enum ConflictTarget {
    Submission,
    FixturePosition,
}

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(&format!("SQLSTATE({code})")) || msg.contains(&format!("code: {code}"))
}

fn is_unique_violation(msg: &str) -> bool {
    mentions_sqlstate(msg, "23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}

fn conflict_for(msg: &str) -> DomainError {
    let target = UNIQUE_MARKERS
        .iter()
        .find(|(marker, _)| msg.contains(marker))
        .map(|(_, target)| *target);

    match target {
        Some(ConflictTarget::Submission) => DomainError::conflict(
            ConflictKind::DuplicateSubmission,
            "Participant already submitted picks for this round",
        ),
        Some(ConflictTarget::FixturePosition) => DomainError::conflict(
            ConflictKind::Other("FixturePosition".into()),
            "Fixture position already taken",
        ),
        None => DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        ),
    }
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        DbErr::ConnectionAcquire(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database pool exhausted");
            return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
        }
        DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        DbErr::Json(_) | DbErr::Type(_) => {
            error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Stored data failed to decode");
            return DomainError::infra(InfraErrorKind::DataCorruption, "Stored data is corrupt");
        }
        _ => {}
    }

    if is_unique_violation(&error_msg) {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");
        return conflict_for(&error_msg);
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::not_found(NotFoundKind::Round, "Round does not exist");
    }

    if error_msg.contains("timed out") || error_msg.contains("timeout") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(InfraErrorKind::Other("DbErr".into()), "Database operation failed")
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        map_db_err(e)
    }
}
