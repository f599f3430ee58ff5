//! Application layer for GenR.
//!
//! Use cases that coordinate the domain model, the stores and the generation
//! gateway. Every use case of a logged-in user shares one [`Workbench`].

pub mod assembler;
pub mod chat;
pub mod collection;
pub mod notifications;
pub mod preferences;
pub mod prompts;
pub mod session_gate;
pub mod steps;
pub mod workbench;

#[cfg(test)]
mod testing;

pub use assembler::PromptAssembler;
pub use chat::{ChatAssistant, ChatReply};
pub use collection::CollectionManager;
pub use notifications::{NotificationCenter, NotificationView};
pub use preferences::Preferences;
pub use session_gate::{LoginOutcome, SessionGate, SessionState, Studio};
pub use steps::StepController;
pub use workbench::{Activity, Workbench};
