use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{OptionVm, QuestionVm, QuizIntent, QuizVm, ResultItemVm, ResultVm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// The live attempt. `Submitting` holds the place while the vm is out grading.
pub(crate) enum QuizScreen {
    Active(QuizVm),
    Submitting,
    Failed(ViewError),
}

enum Shown {
    Question(QuestionVm, Option<ViewError>),
    Results(ResultVm),
    Submitting,
    Failed(ViewError),
}

impl Shown {
    fn of(screen: &QuizScreen) -> Self {
        match screen {
            QuizScreen::Active(vm) => match vm.results() {
                Some(results) => Self::Results(results.clone()),
                None => Self::Question(vm.question(), vm.notice()),
            },
            QuizScreen::Submitting => Self::Submitting,
            QuizScreen::Failed(err) => Self::Failed(*err),
        }
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let subject = ctx.subject_name().to_owned();
    let screen = use_signal(|| match ctx.start_quiz() {
        Ok(controller) => QuizScreen::Active(QuizVm::new(controller)),
        Err(_) => QuizScreen::Failed(ViewError::NoQuestions),
    });

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let mut screen = screen;
        if let QuizScreen::Active(vm) = &mut *screen.write() {
            vm.apply(intent);
        }
    });

    let submit_action = use_callback(move |()| {
        let mut screen = screen;
        spawn(async move {
            let taken = std::mem::replace(&mut *screen.write(), QuizScreen::Submitting);
            match taken {
                QuizScreen::Active(mut vm) => {
                    vm.submit().await;
                    // Put the attempt back whatever the outcome so the screen stays usable.
                    screen.set(QuizScreen::Active(vm));
                }
                other => screen.set(other),
            }
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, submit_action);
            }
        }
    }

    let shown = Shown::of(&screen.read());

    rsx! {
        div { class: "page quiz-page", id: "quiz-root",
            if !subject.is_empty() {
                h2 { class: "subject", "{subject}" }
            }
            match shown {
                Shown::Question(question, notice) => rsx! {
                    QuestionPanel {
                        question,
                        notice,
                        on_intent: move |intent| dispatch_intent.call(intent),
                        on_submit: move |()| submit_action.call(()),
                    }
                },
                Shown::Results(results) => rsx! {
                    ResultsPanel {
                        results,
                        on_reset: move |()| dispatch_intent.call(QuizIntent::Reset),
                    }
                },
                Shown::Submitting => rsx! {
                    p { "Grading..." }
                },
                Shown::Failed(err) => rsx! {
                    p { class: "notice", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn QuestionPanel(
    question: QuestionVm,
    notice: Option<ViewError>,
    on_intent: EventHandler<QuizIntent>,
    on_submit: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "question",
            h3 { "{question.heading}" }
            p { class: "progress", "{question.progress}" }
            div { class: "prompt", dangerous_inner_html: "{question.prompt_html}" }
            div { class: "options",
                for option in question.options {
                    OptionRow { key: "{option.id}", option, on_intent }
                }
            }
            if let Some(previous) = question.previous_answer {
                p { class: "previous-answer", em { "{previous}" } }
            }
        }
        if let Some(err) = notice {
            p { class: "notice", role: "alert", "{err.message()}" }
        }
        div { class: "nav",
            button {
                id: "quiz-prev",
                r#type: "button",
                disabled: !question.can_go_back,
                onclick: move |_| on_intent.call(QuizIntent::Previous),
                "Previous"
            }
            if question.show_next {
                button {
                    id: "quiz-next",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Next),
                    "Next"
                }
            }
            if question.show_submit {
                button {
                    id: "quiz-submit",
                    r#type: "button",
                    onclick: move |_| on_submit.call(()),
                    "Submit"
                }
            }
        }
    }
}

#[component]
fn OptionRow(option: OptionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let class = if option.selected {
        "option selected"
    } else {
        "option"
    };
    let id = option.id.clone();
    rsx! {
        div {
            class: "{class}",
            "data-id": "{option.id}",
            onclick: move |_| on_intent.call(QuizIntent::Choose(id.clone())),
            "{option.label}"
        }
    }
}

#[component]
fn ResultsPanel(results: ResultVm, on_reset: EventHandler<()>) -> Element {
    rsx! {
        div { class: "results",
            h2 { class: "score", "{results.score_line}" }
            for warning in results.warnings {
                p { class: "warning", "{warning}" }
            }
            for item in results.items {
                ResultItem { item }
            }
            button {
                id: "quiz-reset",
                r#type: "button",
                onclick: move |_| on_reset.call(()),
                "Reset"
            }
        }
    }
}

#[component]
fn ResultItem(item: ResultItemVm) -> Element {
    let class = if item.is_correct {
        "question result correct"
    } else {
        "question result incorrect"
    };
    rsx! {
        div { class: "{class}",
            h4 { "{item.heading}" }
            div { class: "prompt", dangerous_inner_html: "{item.prompt_html}" }
            p {
                "{item.chosen_line}"
                br {}
                "{item.correct_line}"
            }
            div { class: "explanation",
                strong { "Rationale: " }
                span { dangerous_inner_html: "{item.rationale_html}" }
            }
            if let Some(distractors) = item.distractor_html {
                div { class: "explanation distractors",
                    strong { "Why not the other options: " }
                    span { dangerous_inner_html: "{distractors}" }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    submit: Rc<RefCell<Option<Callback<()>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, submit: Callback<()>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.submit.borrow_mut() = Some(submit);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn submit(&self) -> Callback<()> {
        (*self.submit.borrow()).expect("quiz submit registered")
    }
}
