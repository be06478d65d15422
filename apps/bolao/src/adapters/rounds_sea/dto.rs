//! DTOs for rounds_sea adapter.

/// DTO for creating a new round.
#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub name: String,
}

impl RoundCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
