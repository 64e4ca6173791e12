//! Loading the question bank from its JSON file.
//!
//! The file is a JSON array of questions:
//! `{ id, exam_label, prompt, options: [{ id, text }], correct_option, rationale, distractor_rationale? }`.
//! Question ids may be strings or integers.

use std::path::Path;

use quiz_core::model::{BankError, QuestionBank, QuestionDraft, QuestionError};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankLoadError {
    #[error("cannot read question bank: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed question bank: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Bank(#[from] BankError),
}

/// Parse and validate a bank from its JSON text.
///
/// # Errors
///
/// Returns `BankLoadError` if the JSON is malformed, a question is invalid,
/// or two questions share an id.
pub fn parse_question_bank(json: &str) -> Result<QuestionBank, BankLoadError> {
    let drafts: Vec<QuestionDraft> = serde_json::from_str(json)?;
    let questions = drafts
        .into_iter()
        .map(QuestionDraft::validate)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(QuestionBank::new(questions)?)
}

/// Read, parse and validate the bank file at `path`.
///
/// # Errors
///
/// Returns `BankLoadError::Io` if the file cannot be read, or any error of
/// [`parse_question_bank`].
pub fn load_question_bank(path: impl AsRef<Path>) -> Result<QuestionBank, BankLoadError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let bank = parse_question_bank(&raw)?;
    tracing::info!(path = %path.display(), questions = bank.len(), "loaded question bank");
    Ok(bank)
}
