use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grader::GradeResult;
use crate::model::{OptionId, QuestionId, QuizSession};

/// Label stored when the attempt has no exam label to borrow from its questions.
pub const DEFAULT_EXAM_LABEL: &str = "Exam";

/// Frozen summary of a graded attempt, as written to the history store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub timestamp: DateTime<Utc>,
    pub subject_name: String,
    pub exam_label: String,
    pub question_ids: Vec<QuestionId>,
    pub answers: BTreeMap<QuestionId, OptionId>,
    pub correct_count: usize,
    pub total_count: usize,
    pub score_percent: u32,
}

impl AttemptRecord {
    /// Snapshot a session together with its grade.
    ///
    /// The exam label is taken from the first selected question.
    #[must_use]
    pub fn from_graded(
        session: &QuizSession,
        grade: &GradeResult,
        subject_name: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let exam_label = session
            .questions()
            .first()
            .map(|q| q.exam_label())
            .filter(|label| !label.trim().is_empty())
            .unwrap_or(DEFAULT_EXAM_LABEL)
            .to_owned();

        Self {
            timestamp,
            subject_name: subject_name.to_owned(),
            exam_label,
            question_ids: session.questions().iter().map(|q| q.id().clone()).collect(),
            answers: session
                .answers()
                .iter()
                .map(|(q, o)| (q.clone(), o.clone()))
                .collect(),
            correct_count: grade.correct_count,
            total_count: grade.total_count,
            score_percent: grade.score_percent,
        }
    }
}
