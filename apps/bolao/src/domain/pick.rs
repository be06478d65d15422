use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::FIXTURE_COUNT;
use crate::errors::domain::{DomainError, ValidationKind};

/// Outcome a participant predicts for one fixture, in Loteca notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pick {
    #[serde(rename = "1")]
    Home,
    #[serde(rename = "X")]
    Draw,
    #[serde(rename = "2")]
    Away,
}

/// Finalized picks, one per fixture in position order.
pub type Picks = [Pick; FIXTURE_COUNT];

impl Pick {
    pub const ALL: [Pick; 3] = [Pick::Home, Pick::Draw, Pick::Away];

    pub const fn as_str(self) -> &'static str {
        match self {
            Pick::Home => "1",
            Pick::Draw => "X",
            Pick::Away => "2",
        }
    }
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pick {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Pick::Home),
            "X" | "x" => Ok(Pick::Draw),
            "2" => Ok(Pick::Away),
            other => Err(DomainError::validation(
                ValidationKind::InvalidPick,
                format!("'{other}' is not a pick (expected 1, X or 2)"),
            )),
        }
    }
}

pub fn picks_to_strings(picks: &Picks) -> Vec<String> {
    picks.iter().map(|p| p.as_str().to_string()).collect()
}

/// Parse stored pick strings back into a fixed-size array.
pub fn picks_from_strings<S: AsRef<str>>(raw: &[S]) -> Result<Picks, DomainError> {
    if raw.len() != FIXTURE_COUNT {
        return Err(DomainError::validation(
            ValidationKind::FixtureCount,
            format!("expected {FIXTURE_COUNT} picks, got {}", raw.len()),
        ));
    }
    let mut picks = [Pick::Home; FIXTURE_COUNT];
    for (slot, s) in picks.iter_mut().zip(raw) {
        *slot = s.as_ref().parse()?;
    }
    Ok(picks)
}
