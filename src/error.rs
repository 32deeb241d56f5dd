//! Error types for content validation and progress persistence.

use thiserror::Error;

/// Content-integrity failures. Callers log these and skip the offending item.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    #[error("exercise {exercise_id}: correct index {index} out of range for {options} options")]
    InvalidCorrectIndex {
        exercise_id: i64,
        index: usize,
        options: usize,
    },

    #[error("exercise {exercise_id}: multiple choice without options")]
    EmptyOptions { exercise_id: i64 },

    #[error("exercise {exercise_id} belongs to topic {found} but is listed under topic {expected}")]
    TopicMismatch {
        exercise_id: i64,
        expected: i64,
        found: i64,
    },

    #[error("unparsable date: {0}")]
    InvalidDate(String),

    #[error("unparsable timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("unknown vocabulary status: {0}")]
    UnknownStatus(String),

    #[error("question count must not be negative, got {0}")]
    InvalidQuestionCount(i64),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("progress store lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;
