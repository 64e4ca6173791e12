#![forbid(unsafe_code)]

pub mod error;
pub mod history;
pub mod quiz;

pub use quiz_core::Clock;

pub use error::{PersistenceWarning, SessionError};
pub use history::{HISTORY_KEY, HistoryAppend, HistoryList, HistoryService};
pub use quiz::{QuestionSnapshot, QuizController, SubmitOutcome};
