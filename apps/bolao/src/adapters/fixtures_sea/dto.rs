//! DTOs for fixtures_sea adapter.

/// One fixture row to insert; `position` is 1-based.
#[derive(Debug, Clone)]
pub struct FixtureCreate {
    pub round_id: i64,
    pub position: u8,
    pub home: String,
    pub away: String,
}
