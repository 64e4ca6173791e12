/// Number of questions drawn per attempt when nothing else is configured.
pub const DEFAULT_QUESTION_LIMIT: i64 = 10;

/// Startup configuration for a quiz, read once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    /// Maximum questions per attempt. Zero or negative yields no questions.
    pub question_limit: i64,
    /// Display name of the subject, stored with every attempt.
    pub subject_name: String,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_limit: DEFAULT_QUESTION_LIMIT,
            subject_name: String::new(),
        }
    }
}

impl QuizConfig {
    #[must_use]
    pub fn with_question_limit(mut self, limit: i64) -> Self {
        self.question_limit = limit;
        self
    }

    #[must_use]
    pub fn with_subject_name(mut self, name: impl Into<String>) -> Self {
        self.subject_name = name.into();
        self
    }
}
