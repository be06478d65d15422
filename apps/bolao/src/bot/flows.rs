//! Per-admin conversation state for opening a round.

use dashmap::DashMap;

use crate::domain::flow::{AdminFlow, FlowOutcome};
use crate::errors::domain::DomainError;

/// Flow state keyed by user id. Idle users have no entry.
#[derive(Debug, Default)]
pub struct AdminFlows {
    flows: DashMap<i64, AdminFlow>,
}

impl AdminFlows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin (or restart) the flow at the name step.
    pub fn start(&self, user_id: i64) {
        self.flows.insert(user_id, AdminFlow::start());
    }

    pub fn is_active(&self, user_id: i64) -> bool {
        self.flows
            .get(&user_id)
            .is_some_and(|f| f.value().is_active())
    }

    pub fn cancel(&self, user_id: i64) -> bool {
        self.flows.remove(&user_id).is_some()
    }

    /// Put a flow back, e.g. after the round could not be opened.
    pub fn restore(&self, user_id: i64, flow: AdminFlow) {
        if flow.is_active() {
            self.flows.insert(user_id, flow);
        } else {
            self.flows.remove(&user_id);
        }
    }

    /// Feed one message to the user's flow and store the next state.
    pub fn advance(&self, user_id: i64, input: &str) -> Result<FlowOutcome, DomainError> {
        let Some((_, current)) = self.flows.remove(&user_id) else {
            return Ok(FlowOutcome::Ignored);
        };
        let (next, outcome) = current.advance(input);
        self.restore(user_id, next);
        outcome
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}
