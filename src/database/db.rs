//! SQLite-backed content catalog and progress store
//!
//! Handles schema initialization, content loading, whole-record progress reads and
//! writes, and the simulated study date used to exercise scheduling across days.

use super::store::{KnowledgeStore, ProgressStore};
use crate::config::EngineConfig;
use crate::error::{ContentError, Result, StoreError};
use crate::models::dates::{format_date, format_timestamp, parse_date, parse_timestamp};
use crate::models::{
    ContentPack, ExerciseContent, GrammarExercise, GrammarProgress, GrammarTopic, ReviewState,
    StreakState, VocabularyItem, VocabularyStatus,
};
use chrono::{DateTime, Days, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::ops::RangeInclusive;
use std::path::Path;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS vocabulary (
        id INTEGER PRIMARY KEY,
        word TEXT NOT NULL,
        translation TEXT NOT NULL,
        pronunciation_ipa TEXT,
        gender TEXT,
        part_of_speech TEXT,
        category TEXT,
        example_sentence TEXT,
        example_translation TEXT
    );

    CREATE TABLE IF NOT EXISTS grammar_topics (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL,
        title_fr TEXT NOT NULL,
        description TEXT,
        explanation TEXT,
        sort_order INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS grammar_exercises (
        id INTEGER PRIMARY KEY,
        topic_id INTEGER NOT NULL,
        difficulty INTEGER NOT NULL,
        content TEXT NOT NULL,
        hint TEXT,
        FOREIGN KEY (topic_id) REFERENCES grammar_topics(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS review_state (
        learner_id INTEGER NOT NULL,
        vocabulary_id INTEGER NOT NULL,
        ease_factor REAL NOT NULL DEFAULT 2.5,
        interval_days INTEGER NOT NULL DEFAULT 1,
        repetitions INTEGER NOT NULL DEFAULT 0,
        next_review_date TEXT NOT NULL,
        last_reviewed_at TEXT,
        times_correct INTEGER NOT NULL DEFAULT 0,
        times_incorrect INTEGER NOT NULL DEFAULT 0,
        unique_days_correct INTEGER NOT NULL DEFAULT 0,
        last_correct_date TEXT,
        status TEXT NOT NULL DEFAULT 'new',
        PRIMARY KEY (learner_id, vocabulary_id)
    );

    CREATE TABLE IF NOT EXISTS grammar_progress (
        learner_id INTEGER NOT NULL,
        topic_id INTEGER NOT NULL,
        mastery_percentage REAL NOT NULL,
        exercises_completed INTEGER NOT NULL,
        unique_days_correct INTEGER NOT NULL,
        last_correct_date TEXT,
        last_practiced_at TEXT NOT NULL,
        PRIMARY KEY (learner_id, topic_id)
    );

    CREATE TABLE IF NOT EXISTS streak_state (
        learner_id INTEGER PRIMARY KEY,
        current_streak INTEGER NOT NULL,
        longest_streak INTEGER NOT NULL,
        last_activity_date TEXT
    );

    CREATE TABLE IF NOT EXISTS app_state (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
";

fn conversion_error(idx: usize, e: ContentError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

fn date_column(row: &Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let text: String = row.get(idx)?;
    parse_date(&text).map_err(|e| conversion_error(idx, e))
}

fn optional_date_column(row: &Row, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| parse_date(&t).map_err(|e| conversion_error(idx, e)))
        .transpose()
}

fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    parse_timestamp(&text).map_err(|e| conversion_error(idx, e))
}

fn optional_timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| parse_timestamp(&t).map_err(|e| conversion_error(idx, e)))
        .transpose()
}

const VOCABULARY_COLUMNS: &str = "id, word, translation, pronunciation_ipa, gender, \
     part_of_speech, category, example_sentence, example_translation";

fn vocabulary_from_row(row: &Row) -> rusqlite::Result<VocabularyItem> {
    Ok(VocabularyItem {
        id: row.get(0)?,
        word: row.get(1)?,
        translation: row.get(2)?,
        pronunciation_ipa: row.get(3)?,
        gender: row.get(4)?,
        part_of_speech: row.get(5)?,
        category: row.get(6)?,
        example_sentence: row.get(7)?,
        example_translation: row.get(8)?,
    })
}

const REVIEW_COLUMNS: &str = "vocabulary_id, ease_factor, interval_days, repetitions, \
     next_review_date, last_reviewed_at, times_correct, times_incorrect, \
     unique_days_correct, last_correct_date, status";

fn review_state_from_row(row: &Row) -> rusqlite::Result<ReviewState> {
    let status: String = row.get(10)?;
    Ok(ReviewState {
        vocabulary_id: row.get(0)?,
        ease_factor: row.get(1)?,
        interval_days: row.get(2)?,
        repetitions: row.get(3)?,
        next_review_date: date_column(row, 4)?,
        last_reviewed_at: optional_timestamp_column(row, 5)?,
        times_correct: row.get(6)?,
        times_incorrect: row.get(7)?,
        unique_days_correct: row.get(8)?,
        last_correct_date: optional_date_column(row, 9)?,
        status: status
            .parse::<VocabularyStatus>()
            .map_err(|e| conversion_error(10, e))?,
    })
}

fn exercise_from_row(row: &Row) -> rusqlite::Result<GrammarExercise> {
    let content: String = row.get(3)?;
    let content: ExerciseContent = serde_json::from_str(&content)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    Ok(GrammarExercise {
        id: row.get(0)?,
        topic_id: row.get(1)?,
        difficulty: row.get(2)?,
        content,
        hint: row.get(4)?,
    })
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a database file and initializes the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        log::info!("Opened progress database at {}", path.as_ref().display());
        Self::init(conn)
    }

    /// Opens the database named by the configuration.
    pub fn open_with_config(config: &EngineConfig) -> Result<Self> {
        Self::open(&config.database_path)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    /// Creates the tables and seeds the study date with today if it is not set.
    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;

        conn.execute(
            "INSERT OR IGNORE INTO app_state (key, value) VALUES ('current_date', ?1)",
            params![format_date(Utc::now().date_naive())],
        )?;

        log::debug!("Progress schema ready");
        Ok(Self { conn })
    }

    /// Current (possibly simulated) study date.
    pub fn current_date(&self) -> Result<NaiveDate> {
        let text: String = self.conn.query_row(
            "SELECT value FROM app_state WHERE key = 'current_date'",
            [],
            |row| row.get(0),
        )?;
        Ok(parse_date(&text)?)
    }

    pub fn set_current_date(&self, date: NaiveDate) -> Result<()> {
        self.conn.execute(
            "UPDATE app_state SET value = ?1 WHERE key = 'current_date'",
            params![format_date(date)],
        )?;
        Ok(())
    }

    /// Moves the study date forward one day (for exercising spaced repetition).
    pub fn advance_day(&self) -> Result<NaiveDate> {
        let next = self
            .current_date()?
            .checked_add_days(Days::new(1))
            .ok_or_else(|| StoreError::NotFound("date after current_date".to_string()))?;
        self.set_current_date(next)?;
        Ok(next)
    }

    /// Inserts or replaces every word, topic and exercise in the pack.
    pub fn load_content_pack(&mut self, pack: &ContentPack) -> Result<()> {
        pack.validate()?;
        let tx = self.conn.transaction()?;

        for item in &pack.vocabulary {
            tx.execute(
                "INSERT OR REPLACE INTO vocabulary (id, word, translation, pronunciation_ipa, gender,
                     part_of_speech, category, example_sentence, example_translation)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    item.id,
                    item.word,
                    item.translation,
                    item.pronunciation_ipa,
                    item.gender,
                    item.part_of_speech,
                    item.category,
                    item.example_sentence,
                    item.example_translation
                ],
            )?;
        }

        for pool in &pack.topics {
            let topic = &pool.topic;
            tx.execute(
                "INSERT OR REPLACE INTO grammar_topics (id, title, title_fr, description, explanation, sort_order)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    topic.id,
                    topic.title,
                    topic.title_fr,
                    topic.description,
                    topic.explanation,
                    topic.sort_order
                ],
            )?;

            for exercise in &pool.exercises {
                tx.execute(
                    "INSERT OR REPLACE INTO grammar_exercises (id, topic_id, difficulty, content, hint)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        exercise.id,
                        exercise.topic_id,
                        exercise.difficulty,
                        serde_json::to_string(&exercise.content)?,
                        exercise.hint
                    ],
                )?;
            }
        }

        tx.commit()?;
        log::info!(
            "Loaded {} words, {} topics, {} exercises",
            pack.vocabulary.len(),
            pack.topics.len(),
            pack.exercise_count()
        );
        Ok(())
    }
}

impl KnowledgeStore for SqliteStore {
    fn vocabulary(&self, id: i64) -> Result<Option<VocabularyItem>> {
        let item = self
            .conn
            .query_row(
                &format!("SELECT {} FROM vocabulary WHERE id = ?1", VOCABULARY_COLUMNS),
                params![id],
                vocabulary_from_row,
            )
            .optional()?;
        Ok(item)
    }

    fn vocabulary_by_category(&self, category: &str) -> Result<Vec<VocabularyItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM vocabulary WHERE lower(category) = lower(?1) ORDER BY id",
            VOCABULARY_COLUMNS
        ))?;
        let items = stmt
            .query_map(params![category], vocabulary_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    fn grammar_topics(&self) -> Result<Vec<GrammarTopic>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, title_fr, description, explanation, sort_order
             FROM grammar_topics ORDER BY sort_order, id",
        )?;
        let topics = stmt
            .query_map([], |row| {
                Ok(GrammarTopic {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    title_fr: row.get(2)?,
                    description: row.get(3)?,
                    explanation: row.get(4)?,
                    sort_order: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(topics)
    }

    fn grammar_exercises(
        &self,
        topic_id: i64,
        difficulty: Option<RangeInclusive<u8>>,
        limit: usize,
    ) -> Result<Vec<GrammarExercise>> {
        let (low, high) = difficulty
            .map(|r| (*r.start(), *r.end()))
            .unwrap_or((u8::MIN, u8::MAX));

        let mut stmt = self.conn.prepare(
            "SELECT id, topic_id, difficulty, content, hint
             FROM grammar_exercises
             WHERE topic_id = ?1 AND difficulty BETWEEN ?2 AND ?3
             ORDER BY id
             LIMIT ?4",
        )?;
        let exercises = stmt
            .query_map(
                params![topic_id, low, high, limit as i64],
                exercise_from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(exercises)
    }
}

impl ProgressStore for SqliteStore {
    fn study_date(&self) -> Result<NaiveDate> {
        self.current_date()
    }

    fn review_state(&self, learner_id: i64, vocabulary_id: i64) -> Result<Option<ReviewState>> {
        let state = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM review_state WHERE learner_id = ?1 AND vocabulary_id = ?2",
                    REVIEW_COLUMNS
                ),
                params![learner_id, vocabulary_id],
                review_state_from_row,
            )
            .optional()?;
        Ok(state)
    }

    fn save_review_state(&self, learner_id: i64, state: &ReviewState) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO review_state (learner_id, vocabulary_id, ease_factor,
                 interval_days, repetitions, next_review_date, last_reviewed_at, times_correct,
                 times_incorrect, unique_days_correct, last_correct_date, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                learner_id,
                state.vocabulary_id,
                state.ease_factor,
                state.interval_days,
                state.repetitions,
                format_date(state.next_review_date),
                state.last_reviewed_at.map(format_timestamp),
                state.times_correct,
                state.times_incorrect,
                state.unique_days_correct,
                state.last_correct_date.map(format_date),
                state.status.as_str()
            ],
        )?;
        log::debug!(
            "Saved review state: learner {} word {} next {}",
            learner_id,
            state.vocabulary_id,
            state.next_review_date
        );
        Ok(())
    }

    fn due_reviews(
        &self,
        learner_id: i64,
        today: NaiveDate,
        limit: usize,
    ) -> Result<Vec<ReviewState>> {
        // YYYY-MM-DD text compares in date order
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM review_state
             WHERE learner_id = ?1 AND next_review_date <= ?2
             ORDER BY next_review_date ASC, vocabulary_id ASC
             LIMIT ?3",
            REVIEW_COLUMNS
        ))?;
        let states = stmt
            .query_map(
                params![learner_id, format_date(today), limit as i64],
                review_state_from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(states)
    }

    fn introduce_vocabulary(
        &self,
        learner_id: i64,
        vocabulary_id: i64,
        today: NaiveDate,
    ) -> Result<ReviewState> {
        if let Some(existing) = self.review_state(learner_id, vocabulary_id)? {
            return Ok(existing);
        }
        let state = ReviewState::new(vocabulary_id, today);
        self.save_review_state(learner_id, &state)?;
        log::info!("Learner {} introduced to word {}", learner_id, vocabulary_id);
        Ok(state)
    }

    fn grammar_progress(&self, learner_id: i64, topic_id: i64) -> Result<Option<GrammarProgress>> {
        let progress = self
            .conn
            .query_row(
                "SELECT topic_id, mastery_percentage, exercises_completed, unique_days_correct,
                        last_correct_date, last_practiced_at
                 FROM grammar_progress WHERE learner_id = ?1 AND topic_id = ?2",
                params![learner_id, topic_id],
                |row| {
                    Ok(GrammarProgress {
                        topic_id: row.get(0)?,
                        mastery_percentage: row.get(1)?,
                        exercises_completed: row.get(2)?,
                        unique_days_correct: row.get(3)?,
                        last_correct_date: optional_date_column(row, 4)?,
                        last_practiced_at: timestamp_column(row, 5)?,
                    })
                },
            )
            .optional()?;
        Ok(progress)
    }

    fn save_grammar_progress(&self, learner_id: i64, progress: &GrammarProgress) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO grammar_progress (learner_id, topic_id, mastery_percentage,
                 exercises_completed, unique_days_correct, last_correct_date, last_practiced_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                learner_id,
                progress.topic_id,
                progress.mastery_percentage,
                progress.exercises_completed,
                progress.unique_days_correct,
                progress.last_correct_date.map(format_date),
                format_timestamp(progress.last_practiced_at)
            ],
        )?;
        Ok(())
    }

    fn streak(&self, learner_id: i64) -> Result<StreakState> {
        let state = self
            .conn
            .query_row(
                "SELECT current_streak, longest_streak, last_activity_date
                 FROM streak_state WHERE learner_id = ?1",
                params![learner_id],
                |row| {
                    Ok(StreakState {
                        current_streak: row.get(0)?,
                        longest_streak: row.get(1)?,
                        last_activity_date: optional_date_column(row, 2)?,
                    })
                },
            )
            .optional()?;
        Ok(state.unwrap_or_default())
    }

    fn save_streak(&self, learner_id: i64, state: &StreakState) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO streak_state (learner_id, current_streak, longest_streak, last_activity_date)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                learner_id,
                state.current_streak,
                state.longest_streak,
                state.last_activity_date.map(format_date)
            ],
        )?;
        Ok(())
    }
}
