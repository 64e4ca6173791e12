use std::collections::{HashMap, HashSet};

use crate::error::QuizError;
use crate::model::{OptionId, Question, QuestionId};

/// In-memory state of one quiz attempt.
///
/// Holds the sampled questions, the current position and the recorded answers.
/// `current` always stays within `0..questions.len()` and `questions` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    answers: HashMap<QuestionId, OptionId>,
}

impl QuizSession {
    /// Start a session over the given questions at index 0 with no answers.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidInput` if `questions` is empty or repeats a question id.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::InvalidInput(
                "a quiz needs at least one question".into(),
            ));
        }
        let mut seen = HashSet::with_capacity(questions.len());
        if let Some(dup) = questions.iter().find(|q| !seen.insert(q.id())) {
            return Err(QuizError::InvalidInput(format!(
                "question {} selected twice",
                dup.id()
            )));
        }

        Ok(Self {
            questions,
            current: 0,
            answers: HashMap::new(),
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// Record `option_id` as the answer to the current question, replacing any earlier answer.
    ///
    /// Ids that do not belong to the question are stored as given and grade as incorrect.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidInput` if `option_id` is blank.
    pub fn record_answer(&mut self, option_id: &str) -> Result<(), QuizError> {
        let option_id = OptionId::new(option_id)?;
        let question_id = self.current_question().id().clone();
        self.answers.insert(question_id, option_id);
        Ok(())
    }

    /// Move by `delta` positions. Moves that would leave the session are ignored.
    ///
    /// Returns whether the position changed.
    pub fn go_to(&mut self, delta: isize) -> bool {
        match self.current.checked_add_signed(delta) {
            Some(target) if target < self.questions.len() => {
                let moved = target != self.current;
                self.current = target;
                moved
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_answered(&self, question_id: &QuestionId) -> bool {
        self.answers.contains_key(question_id)
    }

    #[must_use]
    pub fn answer_for(&self, question_id: &QuestionId) -> Option<&OptionId> {
        self.answers.get(question_id)
    }

    #[must_use]
    pub fn answers(&self) -> &HashMap<QuestionId, OptionId> {
        &self.answers
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    #[must_use]
    pub fn is_first_question(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current == self.questions.len() - 1
    }
}
