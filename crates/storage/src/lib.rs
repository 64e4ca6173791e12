#![forbid(unsafe_code)]

pub mod bank;
pub mod repository;
pub mod sqlite;

pub use bank::{BankLoadError, load_question_bank, parse_question_bank};
pub use repository::{InMemoryStore, KeyValueStore, Storage, StorageError};
