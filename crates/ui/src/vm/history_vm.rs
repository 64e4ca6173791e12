use services::HistoryList;

use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryItemVm {
    pub when: String,
    pub subject: String,
    pub exam: String,
    pub score: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct HistoryVm {
    /// Newest attempt first.
    pub items: Vec<HistoryItemVm>,
    pub warning: Option<String>,
}

#[must_use]
pub fn map_history(list: &HistoryList) -> HistoryVm {
    let items = list
        .records
        .iter()
        .rev()
        .map(|record| HistoryItemVm {
            when: format_datetime(record.timestamp),
            subject: if record.subject_name.is_empty() {
                "-".to_owned()
            } else {
                record.subject_name.clone()
            },
            exam: record.exam_label.clone(),
            score: format!(
                "{}/{} ({}%)",
                record.correct_count, record.total_count, record.score_percent
            ),
        })
        .collect();

    HistoryVm {
        items,
        warning: list.warning.as_ref().map(ToString::to_string),
    }
}
