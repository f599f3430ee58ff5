pub mod defaults;
pub mod model;
pub mod repository;

pub use model::{ApplicationState, CardSummary, SendOutcome};
pub use repository::StateRepository;
