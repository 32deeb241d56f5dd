//! Engine configuration. Every field has a default so a partial (or missing)
//! config file is always usable.

use crate::error::{ContentError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How many questions a quiz session asks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
    #[default]
    Quick,
    Full,
    Custom(usize),
}

impl QuizMode {
    /// Builds a custom mode from an externally supplied count.
    pub fn custom(count: i64) -> std::result::Result<Self, ContentError> {
        usize::try_from(count)
            .map(QuizMode::Custom)
            .map_err(|_| ContentError::InvalidQuestionCount(count))
    }

    pub fn question_count(&self) -> usize {
        match self {
            QuizMode::Quick => 10,
            QuizMode::Full => 25,
            QuizMode::Custom(n) => *n,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub database_path: PathBuf,
    /// Upper bound on due words pulled into one review session.
    pub review_batch_limit: usize,
    /// Upper bound on exercises pulled into one grammar drill.
    pub grammar_drill_limit: usize,
    pub quiz_mode: QuizMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("progress.sqlite3"),
            review_batch_limit: 20,
            grammar_drill_limit: 10,
            quiz_mode: QuizMode::default(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a JSON file, falling back to defaults when the
    /// file does not exist.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&contents)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_quiz_mode_counts() {
        assert_eq!(QuizMode::Quick.question_count(), 10);
        assert_eq!(QuizMode::Full.question_count(), 25);
        assert_eq!(QuizMode::Custom(7).question_count(), 7);
        assert_eq!(QuizMode::default(), QuizMode::Quick);
    }

    #[test]
    fn test_custom_rejects_negative_count() {
        assert_eq!(QuizMode::custom(4), Ok(QuizMode::Custom(4)));
        assert_eq!(
            QuizMode::custom(-1),
            Err(ContentError::InvalidQuestionCount(-1))
        );
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::from_json_file(dir.path().join("nope.json")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        fs::write(&path, r#"{ "review_batch_limit": 5, "quiz_mode": "full" }"#).unwrap();

        let config = EngineConfig::from_json_file(&path).unwrap();
        assert_eq!(config.review_batch_limit, 5);
        assert_eq!(config.quiz_mode, QuizMode::Full);
        assert_eq!(config.grammar_drill_limit, 10);
        assert_eq!(config.database_path, PathBuf::from("progress.sqlite3"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(EngineConfig::from_json_file(&path).is_err());
    }
}
