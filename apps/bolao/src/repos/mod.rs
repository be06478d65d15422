//! Repository layer (the round store): domain models over the SeaORM adapters.

pub mod fixtures;
pub mod rounds;
pub mod submissions;
