//! Learning-progress engine for a language-learning app: spaced-repetition review
//! scheduling for vocabulary, mastery tracking for grammar topics, daily streaks,
//! and mixed quiz assembly.
//!
//! The scheduling, mastery, streak and quiz functions are pure. Persistence and
//! content retrieval go through the [`ProgressStore`] and [`KnowledgeStore`] traits.

pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use config::{EngineConfig, QuizMode};
pub use database::{KnowledgeStore, ProgressStore, SqliteStore};
pub use error::{ContentError, StoreError};
pub use models::{
    GrammarDrillSession, GrammarPool, GrammarProgress, LearningSession, QuizQuestion,
    QuizSession, ReviewState, ReviewableVocabItem, StreakState, compose_quiz, schedule_review,
    update_mastery, update_streak,
};
