use dioxus::prelude::*;
use services::SessionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    NoQuestions,
    Incomplete,
    AlreadySubmitted,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::NoQuestions => "There are no questions to ask. Check the question bank.",
            Self::Incomplete => "Please answer every question before submitting.",
            Self::AlreadySubmitted => "This attempt was already submitted. Reset to start again.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<&SessionError> for ViewError {
    fn from(err: &SessionError) -> Self {
        if err.is_incomplete() {
            return Self::Incomplete;
        }
        match err {
            SessionError::Completed => Self::AlreadySubmitted,
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::QuizError;

    #[test]
    fn incomplete_submission_maps_to_blocking_message() {
        let err = SessionError::Quiz(QuizError::IncompleteAttempt {
            answered: 1,
            total: 3,
        });
        let view = ViewError::from(&err);
        assert_eq!(view, ViewError::Incomplete);
        assert_eq!(view.message(), "Please answer every question before submitting.");
    }

    #[test]
    fn other_errors_map_by_kind() {
        assert_eq!(
            ViewError::from(&SessionError::Completed),
            ViewError::AlreadySubmitted
        );
        assert_eq!(
            ViewError::from(&SessionError::Quiz(QuizError::InvalidInput("x".into()))),
            ViewError::Unknown
        );
    }
}
