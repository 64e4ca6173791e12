#![forbid(unsafe_code)]

pub mod error;
pub mod grader;
pub mod model;
pub mod sampler;
pub mod time;

pub use error::QuizError;
pub use grader::{GradeResult, QuestionResult, grade, score_percent};
pub use sampler::sample;
pub use time::Clock;
