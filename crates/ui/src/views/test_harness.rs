use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{QuestionBank, QuizConfig};
use quiz_core::time::fixed_now;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{Clock, HistoryService};
use storage::repository::{KeyValueStore, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::{HistoryView, QuizView};
use crate::vm::QuizIntent;

const SAMPLE_BANK: &str = include_str!("../../../storage/fixtures/sample_bank.json");

#[derive(Clone)]
struct TestApp {
    bank: Arc<QuestionBank>,
    config: QuizConfig,
    history: Arc<HistoryService>,
}

impl UiApp for TestApp {
    fn question_bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    fn quiz_config(&self) -> QuizConfig {
        self.config.clone()
    }

    fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    fn clock(&self) -> Clock {
        Clock::fixed(fixed_now())
    }

    fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(42)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Quiz,
    History,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| props.quiz_handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::History => rsx! { HistoryView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub history: Arc<HistoryService>,
    pub quiz_handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn dispatch(&self, intent: QuizIntent) {
        let dispatch = self.quiz_handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
    }

    pub fn submit(&self) {
        let submit = self.quiz_handles.submit();
        self.dom.in_runtime(|| submit.call(()));
    }

    /// Run queued work until nothing is left to do.
    pub async fn settle(&mut self) {
        for _ in 0..5 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn sample_bank() -> QuestionBank {
    storage::parse_question_bank(SAMPLE_BANK).expect("sample bank parses")
}

pub fn setup_view_harness(view: ViewKind, limit: i64) -> ViewHarness {
    setup_view_harness_with(view, sample_bank(), limit, Storage::in_memory())
}

pub fn setup_view_harness_with(
    view: ViewKind,
    bank: QuestionBank,
    limit: i64,
    storage: Storage,
) -> ViewHarness {
    let kv: Arc<dyn KeyValueStore> = Arc::clone(&storage.kv);
    let history = Arc::new(HistoryService::new(kv));
    let app = Arc::new(TestApp {
        bank: Arc::new(bank),
        config: QuizConfig::default()
            .with_question_limit(limit)
            .with_subject_name("Computer Networks"),
        history: Arc::clone(&history),
    });
    let quiz_handles = QuizTestHandles::default();

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        history,
        quiz_handles,
    }
}
