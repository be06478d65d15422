//! Services: round lifecycle, transient drafts, submission and aggregation.

pub mod broadcast;
pub mod drafts;
pub mod rounds;
pub mod statistics;
pub mod submissions;

pub use broadcast::{BroadcastRef, BroadcastSlot};
pub use drafts::DraftTracker;
pub use rounds::{ActiveRound, RoundManager};
pub use statistics::AggregationService;
pub use submissions::{Participant, SubmissionResult, SubmissionService};
