use thiserror::Error;

use crate::model::ParseIdError;

/// Errors raised by the quiz state machine and the grader.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("attempt incomplete: {answered} of {total} questions answered")]
    IncompleteAttempt { answered: usize, total: usize },
}

impl From<ParseIdError> for QuizError {
    fn from(err: ParseIdError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
