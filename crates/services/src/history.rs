//! Append-only attempt history kept under one key of a key-value store.

use std::sync::Arc;

use quiz_core::model::AttemptRecord;
use storage::repository::KeyValueStore;

use crate::error::PersistenceWarning;

/// Key the serialized attempt list is stored under.
pub const HISTORY_KEY: &str = "attempt_history";

/// Result of appending one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryAppend {
    /// Length of the list after the append, or of the list read when nothing was written.
    pub total_records: usize,
    pub warnings: Vec<PersistenceWarning>,
}

impl HistoryAppend {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Stored attempts, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryList {
    pub records: Vec<AttemptRecord>,
    pub warning: Option<PersistenceWarning>,
}

/// History store over an injected key-value backend.
///
/// Never fails: problems are returned as `PersistenceWarning`s and logged.
#[derive(Clone)]
pub struct HistoryService {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read every stored attempt. Absent or unreadable history reads as empty.
    pub async fn list(&self) -> HistoryList {
        match self.read().await {
            Ok(records) => HistoryList {
                records,
                warning: None,
            },
            Err(warning) => {
                tracing::warn!(%warning, "attempt history unavailable");
                let warning = match warning {
                    Read::Backend(w) | Read::Corrupt(w) => w,
                };
                HistoryList {
                    records: Vec::new(),
                    warning: Some(warning),
                }
            }
        }
    }

    /// Append `record` and write the whole list back.
    ///
    /// Corrupt stored history is replaced by a list holding only `record`.
    /// When the backend cannot be read at all nothing is written, so an
    /// unreachable but intact history is never overwritten.
    pub async fn append(&self, record: &AttemptRecord) -> HistoryAppend {
        let mut warnings = Vec::new();
        let mut records = match self.read().await {
            Ok(records) => records,
            Err(Read::Corrupt(warning)) => {
                tracing::warn!(%warning, "discarding unreadable attempt history");
                warnings.push(warning);
                Vec::new()
            }
            Err(Read::Backend(warning)) => {
                tracing::warn!(%warning, "attempt not saved");
                return HistoryAppend {
                    total_records: 0,
                    warnings: vec![warning],
                };
            }
        };
        records.push(record.clone());

        let encoded = match serde_json::to_string(&records) {
            Ok(encoded) => encoded,
            Err(e) => {
                let warning = PersistenceWarning::EncodeFailed(e.to_string());
                tracing::warn!(%warning, "attempt not saved");
                warnings.push(warning);
                return HistoryAppend {
                    total_records: records.len() - 1,
                    warnings,
                };
            }
        };

        if let Err(e) = self.store.set(HISTORY_KEY, &encoded).await {
            let warning = PersistenceWarning::WriteFailed(e.to_string());
            tracing::warn!(%warning, "attempt not saved");
            warnings.push(warning);
            return HistoryAppend {
                total_records: records.len() - 1,
                warnings,
            };
        }

        tracing::debug!(total = records.len(), "attempt appended to history");
        HistoryAppend {
            total_records: records.len(),
            warnings,
        }
    }

    async fn read(&self) -> Result<Vec<AttemptRecord>, Read> {
        let raw = self
            .store
            .get(HISTORY_KEY)
            .await
            .map_err(|e| Read::Backend(PersistenceWarning::ReadFailed(e.to_string())))?;
        match raw {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| Read::Corrupt(PersistenceWarning::UnreadableHistory(e.to_string()))),
        }
    }
}

enum Read {
    Backend(PersistenceWarning),
    Corrupt(PersistenceWarning),
}

impl std::fmt::Display for Read {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Read::Backend(w) | Read::Corrupt(w) => w.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quiz_core::model::{OptionId, QuestionId};
    use quiz_core::time::fixed_now;
    use std::collections::BTreeMap;
    use storage::repository::{InMemoryStore, StorageError};

    fn record(subject: &str, correct: usize) -> AttemptRecord {
        let mut answers = BTreeMap::new();
        answers.insert(QuestionId::new("1").unwrap(), OptionId::new("a").unwrap());
        answers.insert(QuestionId::new("2").unwrap(), OptionId::new("b").unwrap());
        AttemptRecord {
            timestamp: fixed_now(),
            subject_name: subject.into(),
            exam_label: "Exam".into(),
            question_ids: vec![QuestionId::new("1").unwrap(), QuestionId::new("2").unwrap()],
            answers,
            correct_count: correct,
            total_count: 2,
            score_percent: quiz_core::score_percent(correct, 2),
        }
    }

    #[tokio::test]
    async fn first_append_creates_one_element_list() {
        let store = Arc::new(InMemoryStore::new());
        let history = HistoryService::new(store.clone());

        let outcome = history.append(&record("Math", 1)).await;
        assert_eq!(outcome.total_records, 1);
        assert!(outcome.is_clean());

        let raw = store.get(HISTORY_KEY).await.unwrap().unwrap();
        let stored: Vec<AttemptRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, vec![record("Math", 1)]);
    }

    #[tokio::test]
    async fn second_append_preserves_first_record() {
        let history = HistoryService::new(Arc::new(InMemoryStore::new()));
        history.append(&record("Math", 1)).await;
        let outcome = history.append(&record("Physics", 2)).await;
        assert_eq!(outcome.total_records, 2);

        let list = history.list().await;
        assert_eq!(list.warning, None);
        assert_eq!(list.records, vec![record("Math", 1), record("Physics", 2)]);
    }

    #[tokio::test]
    async fn corrupt_history_is_treated_as_empty() {
        let store = Arc::new(InMemoryStore::new());
        store.set(HISTORY_KEY, "{definitely not a list").await.unwrap();
        let history = HistoryService::new(store);

        let list = history.list().await;
        assert!(list.records.is_empty());
        assert!(matches!(list.warning, Some(PersistenceWarning::UnreadableHistory(_))));

        let outcome = history.append(&record("Math", 2)).await;
        assert_eq!(outcome.total_records, 1);
        assert!(matches!(
            outcome.warnings.as_slice(),
            [PersistenceWarning::UnreadableHistory(_)]
        ));
        assert_eq!(history.list().await.records, vec![record("Math", 2)]);
    }

    #[tokio::test]
    async fn rejected_write_is_a_warning() {
        let store = Arc::new(InMemoryStore::new().with_quota(16));
        let history = HistoryService::new(store.clone());

        let outcome = history.append(&record("Math", 1)).await;
        assert_eq!(outcome.total_records, 0);
        assert!(matches!(
            outcome.warnings.as_slice(),
            [PersistenceWarning::WriteFailed(_)]
        ));
        assert_eq!(store.get(HISTORY_KEY).await.unwrap(), None);
    }

    struct Unreachable;

    #[async_trait]
    impl KeyValueStore for Unreachable {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Connection("offline".into()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            panic!("must not write when history cannot be read");
        }
    }

    #[tokio::test]
    async fn unreadable_backend_skips_write() {
        let history = HistoryService::new(Arc::new(Unreachable));
        let outcome = history.append(&record("Math", 1)).await;
        assert_eq!(outcome.total_records, 0);
        assert!(matches!(
            outcome.warnings.as_slice(),
            [PersistenceWarning::ReadFailed(_)]
        ));

        let list = history.list().await;
        assert!(list.records.is_empty());
        assert!(matches!(list.warning, Some(PersistenceWarning::ReadFailed(_))));
    }
}
