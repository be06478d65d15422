//! Fixture list parsing for the admin's round-opening message.

use super::FIXTURE_COUNT;
use crate::errors::domain::{DomainError, ValidationKind};

/// One matchup as typed by the admin, labels trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSpec {
    pub home: String,
    pub away: String,
}

impl FixtureSpec {
    pub fn new(home: impl AsRef<str>, away: impl AsRef<str>) -> Result<Self, DomainError> {
        let home = home.as_ref().trim();
        let away = away.as_ref().trim();
        if home.is_empty() || away.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyLabel,
                "fixture labels must not be empty",
            ));
        }
        Ok(Self {
            home: home.to_string(),
            away: away.to_string(),
        })
    }

    /// Parses `"Home x Away"`. A spaced separator (either case) wins; a bare
    /// lowercase `x` is accepted as a fallback (`"FlamengoxVasco"`).
    pub fn parse(entry: &str) -> Result<Self, DomainError> {
        let entry = entry.trim();
        let split = split_spaced(entry).or_else(|| entry.split_once('x'));
        match split {
            Some((home, away)) => Self::new(home, away),
            None => Err(DomainError::validation(
                ValidationKind::FixtureFormat,
                format!("'{entry}' is not in the form 'Home x Away'"),
            )),
        }
    }
}

fn split_spaced(entry: &str) -> Option<(&str, &str)> {
    entry
        .split_once(" x ")
        .or_else(|| entry.split_once(" X "))
}

/// Parses the full list: entries separated by commas or newlines, blank
/// entries skipped, exactly 14 required.
pub fn parse_fixture_list(text: &str) -> Result<Vec<FixtureSpec>, DomainError> {
    let entries: Vec<&str> = text
        .split(|c| c == ',' || c == '\n')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect();

    if entries.len() != FIXTURE_COUNT {
        return Err(DomainError::validation(
            ValidationKind::FixtureCount,
            format!("expected {FIXTURE_COUNT} fixtures, got {}", entries.len()),
        ));
    }

    entries.into_iter().map(FixtureSpec::parse).collect()
}

/// Store-level guard shared by the round manager and the fixture repo.
pub fn validate_fixture_list(fixtures: &[FixtureSpec]) -> Result<(), DomainError> {
    if fixtures.len() != FIXTURE_COUNT {
        return Err(DomainError::validation(
            ValidationKind::FixtureCount,
            format!("expected {FIXTURE_COUNT} fixtures, got {}", fixtures.len()),
        ));
    }
    if fixtures
        .iter()
        .any(|f| f.home.trim().is_empty() || f.away.trim().is_empty())
    {
        return Err(DomainError::validation(
            ValidationKind::EmptyLabel,
            "fixture labels must not be empty",
        ));
    }
    Ok(())
}

/// Trimmed round name, rejecting blank input.
pub fn normalize_round_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyRoundName,
            "round name must not be empty",
        ));
    }
    Ok(name.to_string())
}
