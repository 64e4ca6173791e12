use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use quiz_core::model::{AttemptRecord, QuestionBank, QuizConfig, QuizSession};
use quiz_core::{GradeResult, grade, sample};

use super::snapshot::QuestionSnapshot;
use crate::Clock;
use crate::error::{PersistenceWarning, SessionError};
use crate::history::HistoryService;

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub grade: GradeResult,
    pub record: AttemptRecord,
    pub warnings: Vec<PersistenceWarning>,
}

/// Owns the one live quiz attempt and serves the presentation's calls.
///
/// The session is replaced wholesale by `initialize_session` and `reset`.
/// After a successful `submit` the attempt is frozen until the next reset.
pub struct QuizController {
    bank: Arc<QuestionBank>,
    config: QuizConfig,
    history: Arc<HistoryService>,
    clock: Clock,
    rng: StdRng,
    limit: i64,
    session: QuizSession,
    outcome: Option<SubmitOutcome>,
}

impl QuizController {
    /// Sample a first attempt using the configured question limit.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Quiz(InvalidInput)` if no questions can be drawn.
    pub fn new(
        bank: Arc<QuestionBank>,
        config: QuizConfig,
        history: Arc<HistoryService>,
    ) -> Result<Self, SessionError> {
        Self::with_parts(
            bank,
            config,
            history,
            Clock::default_clock(),
            StdRng::from_os_rng(),
        )
    }

    /// Like [`QuizController::new`] with an explicit clock and random source.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Quiz(InvalidInput)` if no questions can be drawn.
    pub fn with_parts(
        bank: Arc<QuestionBank>,
        config: QuizConfig,
        history: Arc<HistoryService>,
        clock: Clock,
        mut rng: StdRng,
    ) -> Result<Self, SessionError> {
        let limit = config.question_limit;
        let session = draw(&bank, limit, &mut rng)?;
        tracing::info!(
            questions = session.len(),
            limit,
            bank = bank.len(),
            "quiz session initialised"
        );
        Ok(Self {
            bank,
            config,
            history,
            clock,
            rng,
            limit,
            session,
            outcome: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// The graded result, once the attempt has been submitted.
    #[must_use]
    pub fn outcome(&self) -> Option<&SubmitOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn snapshot(&self) -> QuestionSnapshot {
        QuestionSnapshot::of(&self.session)
    }

    /// Replace the attempt with a fresh sample of up to `limit` questions.
    ///
    /// On failure the current attempt is kept unchanged.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Quiz(InvalidInput)` if the bank is empty or `limit <= 0`.
    pub fn initialize_session(&mut self, limit: i64) -> Result<QuestionSnapshot, SessionError> {
        let session = draw(&self.bank, limit, &mut self.rng)?;
        self.limit = limit;
        self.session = session;
        self.outcome = None;
        tracing::info!(questions = self.session.len(), limit, "quiz session initialised");
        Ok(self.snapshot())
    }

    /// Start over with a new sample drawn with the last used limit.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Quiz(InvalidInput)` if no questions can be drawn.
    pub fn reset(&mut self) -> Result<QuestionSnapshot, SessionError> {
        tracing::debug!("quiz reset requested");
        self.initialize_session(self.limit)
    }

    /// Answer the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after submission, or
    /// `SessionError::Quiz(InvalidInput)` for a blank option id.
    pub fn record_answer(&mut self, option_id: &str) -> Result<QuestionSnapshot, SessionError> {
        self.ensure_open()?;
        self.session.record_answer(option_id)?;
        Ok(self.snapshot())
    }

    /// Move `delta` questions; moves past either end are ignored.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after submission.
    pub fn navigate(&mut self, delta: isize) -> Result<QuestionSnapshot, SessionError> {
        self.ensure_open()?;
        if !self.session.go_to(delta) {
            tracing::trace!(delta, index = self.session.current_index(), "navigation ignored");
        }
        Ok(self.snapshot())
    }

    /// Grade the attempt and append it to the history.
    ///
    /// History problems come back as warnings inside the outcome.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Quiz(IncompleteAttempt)` if any question is
    /// unanswered (nothing changes), or `SessionError::Completed` if the
    /// attempt was already submitted.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SessionError> {
        self.ensure_open()?;
        let grade = grade(&self.session)?;
        let record = AttemptRecord::from_graded(
            &self.session,
            &grade,
            &self.config.subject_name,
            self.clock.now(),
        );
        tracing::info!(
            correct = grade.correct_count,
            total = grade.total_count,
            percent = grade.score_percent,
            "attempt graded"
        );

        let appended = self.history.append(&record).await;
        let outcome = SubmitOutcome {
            grade,
            record,
            warnings: appended.warnings,
        };
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.outcome.is_some() {
            return Err(SessionError::Completed);
        }
        Ok(())
    }
}

fn draw(bank: &QuestionBank, limit: i64, rng: &mut StdRng) -> Result<QuizSession, SessionError> {
    let questions = sample(bank.questions(), limit, rng);
    Ok(QuizSession::new(questions)?)
}
