mod history_vm;
mod markdown_vm;
mod quiz_vm;
mod result_vm;
mod time_fmt;

pub use history_vm::{HistoryItemVm, HistoryVm, map_history};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use quiz_vm::{OptionVm, QuestionVm, QuizIntent, QuizVm};
pub use result_vm::{ResultItemVm, ResultVm, map_results};
