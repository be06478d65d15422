//! SeaORM adapters: thin query functions returning entity models and `DbErr`.

pub mod fixtures_sea;
pub mod rounds_sea;
pub mod submissions_sea;
