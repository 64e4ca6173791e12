use quiz_core::model::Question;
use services::{QuestionSnapshot, QuizController};

use crate::views::ViewError;
use crate::vm::markdown_vm::markdown_to_html;
use crate::vm::result_vm::{ResultVm, map_results};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Choose(String),
    Previous,
    Next,
    Reset,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub heading: String,
    pub prompt_html: String,
    pub options: Vec<OptionVm>,
    pub previous_answer: Option<String>,
    pub progress: String,
    pub can_go_back: bool,
    pub show_next: bool,
    pub show_submit: bool,
}

impl QuestionVm {
    fn from_snapshot(snapshot: &QuestionSnapshot) -> Self {
        let question = &snapshot.question;
        let selected = snapshot.previous_answer.as_ref();
        Self {
            heading: format!("{} - {}", question.id(), question.exam_label()),
            prompt_html: markdown_to_html(question.prompt()),
            options: question
                .options()
                .iter()
                .map(|option| OptionVm {
                    id: option.id.to_string(),
                    label: format!("{}. {}", option.id, option.text),
                    selected: selected == Some(&option.id),
                })
                .collect(),
            previous_answer: selected.map(|id| format!("Your previous answer: {id}")),
            progress: format!(
                "Question {} of {} ({} answered)",
                snapshot.position, snapshot.total, snapshot.answered_count
            ),
            can_go_back: !snapshot.is_first,
            show_next: !snapshot.is_last,
            show_submit: snapshot.can_submit,
        }
    }
}

/// Presentation state of one quiz screen: the controller plus what to show next.
pub struct QuizVm {
    controller: QuizController,
    results: Option<ResultVm>,
    notice: Option<ViewError>,
}

impl QuizVm {
    #[must_use]
    pub fn new(controller: QuizController) -> Self {
        Self {
            controller,
            results: None,
            notice: None,
        }
    }

    #[must_use]
    pub fn question(&self) -> QuestionVm {
        QuestionVm::from_snapshot(&self.controller.snapshot())
    }

    #[must_use]
    pub fn results(&self) -> Option<&ResultVm> {
        self.results.as_ref()
    }

    /// Blocking message for the last action, if it was refused.
    #[must_use]
    pub fn notice(&self) -> Option<ViewError> {
        self.notice
    }

    pub fn apply(&mut self, intent: QuizIntent) {
        let result = match intent {
            QuizIntent::Choose(option_id) => self.controller.record_answer(&option_id),
            QuizIntent::Previous => self.controller.navigate(-1),
            QuizIntent::Next => self.controller.navigate(1),
            QuizIntent::Reset => self.controller.reset().inspect(|_| self.results = None),
        };
        self.notice = result.err().map(|err| ViewError::from(&err));
    }

    pub async fn submit(&mut self) {
        match self.controller.submit().await {
            Ok(outcome) => {
                self.results = Some(map_results(self.questions(), &outcome));
                self.notice = None;
            }
            Err(err) => self.notice = Some(ViewError::from(&err)),
        }
    }

    fn questions(&self) -> &[Question] {
        self.controller.session().questions()
    }
}
