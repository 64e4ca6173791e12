mod controller;
mod snapshot;

// Public API of the quiz subsystem.
pub use crate::error::SessionError;
pub use controller::{QuizController, SubmitOutcome};
pub use snapshot::QuestionSnapshot;
