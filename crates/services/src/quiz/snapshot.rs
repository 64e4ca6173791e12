use quiz_core::model::{OptionId, Question, QuizSession};

/// Everything the presentation needs to draw the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSnapshot {
    pub question: Question,
    pub previous_answer: Option<OptionId>,
    pub is_first: bool,
    pub is_last: bool,
    pub is_current_answered: bool,
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub answered_count: usize,
    /// Submission is offered on the last question once it has an answer.
    pub can_submit: bool,
}

impl QuestionSnapshot {
    #[must_use]
    pub fn of(session: &QuizSession) -> Self {
        let question = session.current_question();
        let previous_answer = session.answer_for(question.id()).cloned();
        let is_last = session.is_last_question();
        let is_current_answered = previous_answer.is_some();

        Self {
            question: question.clone(),
            previous_answer,
            is_first: session.is_first_question(),
            is_last,
            is_current_answered,
            position: session.current_index() + 1,
            total: session.len(),
            answered_count: session.answered_count(),
            can_submit: is_last && is_current_answered,
        }
    }
}
