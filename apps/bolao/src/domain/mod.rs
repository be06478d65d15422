//! Domain layer: pure bolão rules with no I/O.

pub mod draft;
pub mod fixtures;
pub mod flow;
pub mod pick;
pub mod statistics;

#[cfg(test)]
mod tests_draft_props;

/// Fixtures per round, fixed by the Loteca format.
pub const FIXTURE_COUNT: usize = 14;

pub use draft::{CompletionStatus, Draft};
pub use fixtures::FixtureSpec;
pub use flow::{AdminFlow, FlowOutcome};
pub use pick::{Pick, Picks};
pub use statistics::RoundStatistics;
