use crate::error::QuizError;
use crate::model::{OptionId, QuestionId, QuizSession};

/// Outcome for one question of a graded attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResult {
    pub question_id: QuestionId,
    pub chosen: OptionId,
    pub correct: OptionId,
    pub is_correct: bool,
}

/// Grade of a complete attempt. `per_question` follows the session order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeResult {
    pub per_question: Vec<QuestionResult>,
    pub correct_count: usize,
    pub total_count: usize,
    pub score_percent: u32,
}

/// Grade a session without modifying it.
///
/// # Errors
///
/// Returns `QuizError::IncompleteAttempt` if any question is unanswered.
pub fn grade(session: &QuizSession) -> Result<GradeResult, QuizError> {
    let incomplete = || QuizError::IncompleteAttempt {
        answered: session.answered_count(),
        total: session.len(),
    };
    if !session.is_complete() {
        return Err(incomplete());
    }

    let per_question = session
        .questions()
        .iter()
        .map(|question| {
            let chosen = session.answer_for(question.id()).ok_or_else(incomplete)?;
            Ok(QuestionResult {
                question_id: question.id().clone(),
                chosen: chosen.clone(),
                correct: question.correct_option().clone(),
                is_correct: chosen == question.correct_option(),
            })
        })
        .collect::<Result<Vec<_>, QuizError>>()?;

    let correct_count = per_question.iter().filter(|r| r.is_correct).count();
    let total_count = per_question.len();

    Ok(GradeResult {
        per_question,
        correct_count,
        total_count,
        score_percent: score_percent(correct_count, total_count),
    })
}

/// Percentage of correct answers rounded half up (12.5 becomes 13).
///
/// Integer arithmetic: `floor(100 * correct / total + 1/2)`. Returns 0 when `total` is 0.
#[must_use]
pub fn score_percent(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total) as u128;
    let total = total as u128;
    let rounded = (correct * 200 + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(100)
}
