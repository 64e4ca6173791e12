//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::QuizError;

/// Errors emitted by `QuizController`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error("attempt already graded; reset to start a new one")]
    Completed,
}

impl SessionError {
    /// True when the attempt was submitted with unanswered questions.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Quiz(QuizError::IncompleteAttempt { .. }))
    }
}

/// Non-fatal history problems. Grading and display go ahead regardless.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PersistenceWarning {
    #[error("attempt history could not be read: {0}")]
    ReadFailed(String),
    #[error("stored attempt history is unreadable and was treated as empty: {0}")]
    UnreadableHistory(String),
    #[error("attempt history could not be encoded: {0}")]
    EncodeFailed(String),
    #[error("attempt history could not be saved: {0}")]
    WriteFailed(String),
}
