//! Admin conversation for opening a round: name first, then the fixture list.

use super::fixtures::{normalize_round_name, parse_fixture_list, FixtureSpec};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AdminFlow {
    #[default]
    Idle,
    AwaitingName,
    AwaitingFixtures {
        name: String,
    },
}

/// What a single admin message did to the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Flow was idle; the text is not meant for it.
    Ignored,
    Cancelled,
    NameAccepted { name: String },
    /// Input complete; the caller opens the round.
    Ready {
        name: String,
        fixtures: Vec<FixtureSpec>,
    },
}

/// `/cancel` or `/cancelar`, with or without a `@botname` suffix.
pub fn is_cancel(input: &str) -> bool {
    let first = input.split_whitespace().next().unwrap_or("");
    let command = first.split('@').next().unwrap_or("");
    command.eq_ignore_ascii_case("/cancel") || command.eq_ignore_ascii_case("/cancelar")
}

impl AdminFlow {
    pub fn start() -> Self {
        AdminFlow::AwaitingName
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, AdminFlow::Idle)
    }

    /// Feed one message. Returns the next state and the outcome; on a
    /// validation error the state stays at the current step.
    pub fn advance(self, input: &str) -> (AdminFlow, Result<FlowOutcome, DomainError>) {
        if !self.is_active() {
            return (self, Ok(FlowOutcome::Ignored));
        }
        if is_cancel(input) {
            return (AdminFlow::Idle, Ok(FlowOutcome::Cancelled));
        }

        match self {
            AdminFlow::Idle => (AdminFlow::Idle, Ok(FlowOutcome::Ignored)),
            AdminFlow::AwaitingName => match normalize_round_name(input) {
                Ok(name) => (
                    AdminFlow::AwaitingFixtures { name: name.clone() },
                    Ok(FlowOutcome::NameAccepted { name }),
                ),
                Err(e) => (AdminFlow::AwaitingName, Err(e)),
            },
            AdminFlow::AwaitingFixtures { name } => match parse_fixture_list(input) {
                Ok(fixtures) => (AdminFlow::Idle, Ok(FlowOutcome::Ready { name, fixtures })),
                Err(e) => (AdminFlow::AwaitingFixtures { name }, Err(e)),
            },
        }
    }
}
