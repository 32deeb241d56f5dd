//! Collaborator interfaces the engine reads content from and writes progress to.
//!
//! Progress is exchanged as whole-record snapshots: read, compute the next record,
//! write it back. Concurrent writers to the same key resolve last-write-wins.

use crate::error::Result;
use crate::models::{
    GrammarExercise, GrammarPool, GrammarProgress, GrammarTopic, ReviewState,
    ReviewableVocabItem, StreakState, VocabularyItem,
};
use chrono::NaiveDate;
use std::ops::RangeInclusive;

/// Read-only content catalog.
pub trait KnowledgeStore {
    fn vocabulary(&self, id: i64) -> Result<Option<VocabularyItem>>;

    fn vocabulary_by_category(&self, category: &str) -> Result<Vec<VocabularyItem>>;

    /// Topics ordered by their sort order.
    fn grammar_topics(&self) -> Result<Vec<GrammarTopic>>;

    fn grammar_exercises(
        &self,
        topic_id: i64,
        difficulty: Option<RangeInclusive<u8>>,
        limit: usize,
    ) -> Result<Vec<GrammarExercise>>;

    /// Every topic with up to `limit_per_topic` of its exercises.
    fn grammar_pools(&self, limit_per_topic: usize) -> Result<Vec<GrammarPool>> {
        self.grammar_topics()?
            .into_iter()
            .map(|topic| -> Result<GrammarPool> {
                let exercises = self.grammar_exercises(topic.id, None, limit_per_topic)?;
                Ok(GrammarPool { topic, exercises })
            })
            .collect()
    }
}

pub trait ProgressStore {
    /// Calendar day that answers and activity are recorded against.
    fn study_date(&self) -> Result<NaiveDate>;

    fn review_state(&self, learner_id: i64, vocabulary_id: i64) -> Result<Option<ReviewState>>;

    fn save_review_state(&self, learner_id: i64, state: &ReviewState) -> Result<()>;

    /// States due on `today`, most overdue first.
    fn due_reviews(&self, learner_id: i64, today: NaiveDate, limit: usize)
    -> Result<Vec<ReviewState>>;

    /// Creates the default review state the first time a learner meets a word.
    /// An existing state is returned untouched.
    fn introduce_vocabulary(
        &self,
        learner_id: i64,
        vocabulary_id: i64,
        today: NaiveDate,
    ) -> Result<ReviewState>;

    fn grammar_progress(&self, learner_id: i64, topic_id: i64) -> Result<Option<GrammarProgress>>;

    fn save_grammar_progress(&self, learner_id: i64, progress: &GrammarProgress) -> Result<()>;

    /// A learner with no recorded activity has the default (empty) streak.
    fn streak(&self, learner_id: i64) -> Result<StreakState>;

    fn save_streak(&self, learner_id: i64, state: &StreakState) -> Result<()>;
}

/// Due words joined with their catalog entries. Words missing from the catalog
/// are logged and left out.
pub fn due_vocabulary<S>(
    store: &S,
    learner_id: i64,
    today: NaiveDate,
    limit: usize,
) -> Result<Vec<ReviewableVocabItem>>
where
    S: KnowledgeStore + ProgressStore + ?Sized,
{
    let mut items = Vec::new();
    for state in store.due_reviews(learner_id, today, limit)? {
        match store.vocabulary(state.vocabulary_id)? {
            Some(item) => items.push(ReviewableVocabItem { item, state }),
            None => log::warn!(
                "Review state for unknown vocabulary {} (learner {})",
                state.vocabulary_id,
                learner_id
            ),
        }
    }
    Ok(items)
}
