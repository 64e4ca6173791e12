mod attempt;
mod config;
mod ids;
mod question;
mod session;

pub use ids::{OptionId, ParseIdError, QuestionId};

pub use attempt::{AttemptRecord, DEFAULT_EXAM_LABEL};
pub use config::{DEFAULT_QUESTION_LIMIT, QuizConfig};
pub use question::{AnswerOption, BankError, Question, QuestionBank, QuestionDraft, QuestionError};
pub use session::QuizSession;
