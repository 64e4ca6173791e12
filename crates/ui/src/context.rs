use std::sync::Arc;

use quiz_core::model::{QuestionBank, QuizConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{Clock, HistoryService, QuizController, SessionError};

/// What the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn question_bank(&self) -> Arc<QuestionBank>;
    fn quiz_config(&self) -> QuizConfig;
    fn history(&self) -> Arc<HistoryService>;

    fn clock(&self) -> Clock {
        Clock::default_clock()
    }

    /// Random source for each new attempt.
    fn rng(&self) -> StdRng {
        StdRng::from_os_rng()
    }
}

#[derive(Clone)]
pub struct AppContext {
    app: Arc<dyn UiApp>,
    bank: Arc<QuestionBank>,
    config: QuizConfig,
    history: Arc<HistoryService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            app: Arc::clone(app),
            bank: app.question_bank(),
            config: app.quiz_config(),
            history: app.history(),
        }
    }

    #[must_use]
    pub fn subject_name(&self) -> &str {
        &self.config.subject_name
    }

    #[must_use]
    pub fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    /// Build a controller holding a freshly sampled attempt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if no questions can be drawn.
    pub fn start_quiz(&self) -> Result<QuizController, SessionError> {
        QuizController::with_parts(
            Arc::clone(&self.bank),
            self.config.clone(),
            Arc::clone(&self.history),
            self.app.clock(),
            self.app.rng(),
        )
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
