pub mod fixtures;
pub mod rounds;
pub mod submissions;

pub use fixtures::Entity as Fixtures;
pub use fixtures::Model as Fixture;
pub use rounds::Entity as Rounds;
pub use rounds::Model as Round;
pub use submissions::Entity as Submissions;
pub use submissions::Model as Submission;
