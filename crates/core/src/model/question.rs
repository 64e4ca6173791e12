use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{OptionId, QuestionId};

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// One selectable answer of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: OptionId,
    pub text: String,
}

impl AnswerOption {
    #[must_use]
    pub fn new(id: OptionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// Unvalidated question as it appears in a bank file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionDraft {
    pub id: QuestionId,
    #[serde(default)]
    pub exam_label: String,
    pub prompt: String,
    pub options: Vec<AnswerOption>,
    pub correct_option: OptionId,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub distractor_rationale: Option<String>,
}

impl QuestionDraft {
    /// Validate the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, there are no options,
    /// option ids repeat, or the correct option is not one of the options.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt { id: self.id });
        }
        if self.options.is_empty() {
            return Err(QuestionError::NoOptions { id: self.id });
        }

        let mut seen = HashSet::with_capacity(self.options.len());
        for option in &self.options {
            if !seen.insert(&option.id) {
                return Err(QuestionError::DuplicateOption {
                    id: self.id.clone(),
                    option: option.id.clone(),
                });
            }
        }
        if !seen.contains(&self.correct_option) {
            return Err(QuestionError::UnknownCorrectOption {
                id: self.id,
                option: self.correct_option,
            });
        }

        let distractor_rationale = self
            .distractor_rationale
            .filter(|text| !text.trim().is_empty());

        Ok(Question {
            id: self.id,
            exam_label: self.exam_label,
            prompt: self.prompt,
            options: self.options,
            correct_option: self.correct_option,
            rationale: self.rationale,
            distractor_rationale,
        })
    }
}

/// A validated multiple-choice question.
///
/// `correct_option` is always one of `options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    exam_label: String,
    prompt: String,
    options: Vec<AnswerOption>,
    correct_option: OptionId,
    rationale: String,
    distractor_rationale: Option<String>,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn exam_label(&self) -> &str {
        &self.exam_label
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> &OptionId {
        &self.correct_option
    }

    #[must_use]
    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    #[must_use]
    pub fn distractor_rationale(&self) -> Option<&str> {
        self.distractor_rationale.as_deref()
    }

    /// Look up an option by id.
    #[must_use]
    pub fn option(&self, id: &OptionId) -> Option<&AnswerOption> {
        self.options.iter().find(|option| &option.id == id)
    }
}

//
// ─── QUESTION BANK ─────────────────────────────────────────────────────────────
//

/// The full, read-only pool questions are sampled from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// # Errors
    ///
    /// Returns `BankError::DuplicateQuestionId` if two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(BankError::DuplicateQuestionId(question.id().clone()));
            }
        }
        Ok(Self { questions })
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
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has an empty prompt")]
    EmptyPrompt { id: QuestionId },

    #[error("question {id} has no options")]
    NoOptions { id: QuestionId },

    #[error("question {id} repeats option {option}")]
    DuplicateOption { id: QuestionId, option: OptionId },

    #[error("question {id} marks {option} correct but has no such option")]
    UnknownCorrectOption { id: QuestionId, option: OptionId },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("question id {0} appears more than once")]
    DuplicateQuestionId(QuestionId),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
