//! Machine-readable error codes surfaced on the HTTP boundary.
//!
//! Each variant maps to exactly one SCREAMING_SNAKE_CASE string via
//! [`ErrorCode::as_str`]. Logs and problem+json bodies both use these strings.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request / webhook
    Unauthorized,
    BadRequest,
    ValidationError,

    // Round and draft rules
    FixtureCount,
    FixtureFormat,
    EmptyLabel,
    EmptyRoundName,
    InvalidFixtureIndex,
    InvalidPick,
    StaleRound,
    IncompleteDraft,

    // Resource Not Found
    RoundNotFound,
    SubmissionNotFound,
    NotFound,

    // Conflicts
    DuplicateSubmission,
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    DataCorruption,
    UniqueViolation,
    Internal,
    ConfigError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 23] = [
        Self::Unauthorized,
        Self::BadRequest,
        Self::ValidationError,
        Self::FixtureCount,
        Self::FixtureFormat,
        Self::EmptyLabel,
        Self::EmptyRoundName,
        Self::InvalidFixtureIndex,
        Self::InvalidPick,
        Self::StaleRound,
        Self::IncompleteDraft,
        Self::RoundNotFound,
        Self::SubmissionNotFound,
        Self::NotFound,
        Self::DuplicateSubmission,
        Self::Conflict,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::DataCorruption,
        Self::UniqueViolation,
        Self::Internal,
        Self::ConfigError,
    ];

    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::FixtureCount => "FIXTURE_COUNT",
            Self::FixtureFormat => "FIXTURE_FORMAT",
            Self::EmptyLabel => "EMPTY_LABEL",
            Self::EmptyRoundName => "EMPTY_ROUND_NAME",
            Self::InvalidFixtureIndex => "INVALID_FIXTURE_INDEX",
            Self::InvalidPick => "INVALID_PICK",
            Self::StaleRound => "STALE_ROUND",
            Self::IncompleteDraft => "INCOMPLETE_DRAFT",

            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::SubmissionNotFound => "SUBMISSION_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DuplicateSubmission => "DUPLICATE_SUBMISSION",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
