use quiz_core::model::{OptionId, Question};
use services::SubmitOutcome;

use crate::vm::markdown_vm::markdown_to_html;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultItemVm {
    pub heading: String,
    pub is_correct: bool,
    pub prompt_html: String,
    pub chosen_line: String,
    pub correct_line: String,
    pub rationale_html: String,
    pub distractor_html: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub score_line: String,
    pub items: Vec<ResultItemVm>,
    pub warnings: Vec<String>,
}

/// Map a graded attempt onto the result screen, in the order the questions were asked.
#[must_use]
pub fn map_results(questions: &[Question], outcome: &SubmitOutcome) -> ResultVm {
    let grade = &outcome.grade;
    let items = grade
        .per_question
        .iter()
        .zip(questions)
        .map(|(result, question)| {
            let verdict = if result.is_correct {
                "✅ Correct"
            } else {
                "❌ Incorrect"
            };
            let suffix = if result.is_correct {
                "(Correct)"
            } else {
                "(Incorrect)"
            };
            ResultItemVm {
                heading: format!("{}: {verdict}", result.question_id),
                is_correct: result.is_correct,
                prompt_html: markdown_to_html(question.prompt()),
                chosen_line: format!(
                    "Your answer: {} {suffix}",
                    describe(question, &result.chosen)
                ),
                correct_line: format!("Correct answer: {}", describe(question, &result.correct)),
                rationale_html: markdown_to_html(question.rationale()),
                distractor_html: question.distractor_rationale().map(markdown_to_html),
            }
        })
        .collect();

    ResultVm {
        score_line: format!(
            "Score: {}/{} ({}%)",
            grade.correct_count, grade.total_count, grade.score_percent
        ),
        items,
        warnings: outcome.warnings.iter().map(ToString::to_string).collect(),
    }
}

fn describe(question: &Question, id: &OptionId) -> String {
    match question.option(id) {
        Some(option) => format!("{id}. {}", option.text),
        None => id.to_string(),
    }
}
