//! Focused practice on one grammar topic.
//!
//! The learner's mastery of the topic picks the difficulty band, so exercises get
//! harder as mastery grows. Every answer goes through the mastery tracker.

use super::learning_session::{lock_store, record_activity};
use super::quiz::grammar_question;
use super::{
    GrammarExercise, GrammarProgress, QuizAnswer, QuizQuestion, StreakState,
    difficulty_range_for_mastery, update_mastery,
};
use crate::config::EngineConfig;
use crate::database::store::{KnowledgeStore, ProgressStore};
use crate::error::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};

/// An exercise together with the question it is asked as.
#[derive(Clone, Debug)]
pub struct DrillItem {
    pub exercise: GrammarExercise,
    pub question: QuizQuestion,
}

pub struct GrammarDrillSession<S: ProgressStore> {
    pub learner_id: i64,
    pub topic_id: i64,
    pub difficulty: RangeInclusive<u8>,
    pub items: Vec<DrillItem>,
    pub current_index: usize,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub today: NaiveDate,
    store: Arc<Mutex<S>>,
    activity_recorded: bool,
}

impl<S: KnowledgeStore + ProgressStore> GrammarDrillSession<S> {
    /// Loads up to the configured number of exercises for the topic, in the band
    /// matching the learner's current mastery, and shuffles them.
    pub fn start<R: Rng + ?Sized>(
        learner_id: i64,
        topic_id: i64,
        store: Arc<Mutex<S>>,
        config: &EngineConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let (today, difficulty, mut exercises) = {
            let guard = lock_store(&store)?;
            let today = guard.study_date()?;
            let mastery = guard
                .grammar_progress(learner_id, topic_id)?
                .map_or(0.0, |p| p.mastery_percentage);
            let difficulty = difficulty_range_for_mastery(mastery);
            let exercises = guard.grammar_exercises(
                topic_id,
                Some(difficulty.clone()),
                config.grammar_drill_limit,
            )?;
            (today, difficulty, exercises)
        };
        exercises.shuffle(rng);

        let items: Vec<DrillItem> = exercises
            .into_iter()
            .filter_map(|exercise| {
                grammar_question(&exercise).map(|question| DrillItem { exercise, question })
            })
            .collect();

        log::info!(
            "Drill for learner {} on topic {}: {} exercises at difficulty {}-{}",
            learner_id,
            topic_id,
            items.len(),
            difficulty.start(),
            difficulty.end()
        );

        Ok(Self {
            learner_id,
            topic_id,
            difficulty,
            items,
            current_index: 0,
            correct_count: 0,
            incorrect_count: 0,
            today,
            store,
            activity_recorded: false,
        })
    }
}

impl<S: ProgressStore> GrammarDrillSession<S> {
    pub fn current_item(&self) -> Option<&DrillItem> {
        self.items.get(self.current_index)
    }

    /// Grades the current exercise against the topic's mastery and moves on.
    /// Returns the updated progress, or `None` once the drill is over.
    pub fn answer(
        &mut self,
        answer: &QuizAnswer,
        now: DateTime<Utc>,
    ) -> Result<Option<(bool, GrammarProgress)>> {
        let Some(item) = self.items.get(self.current_index) else {
            return Ok(None);
        };
        let is_correct = item.question.check(answer);

        let progress = {
            let store = lock_store(&self.store)?;
            let current = store.grammar_progress(self.learner_id, self.topic_id)?;
            let next = update_mastery(self.topic_id, current.as_ref(), is_correct, self.today, now);
            store.save_grammar_progress(self.learner_id, &next)?;
            next
        };
        log::debug!(
            "Drill exercise {} ({}): topic {} at {:.0}%",
            item.exercise.id,
            if is_correct { "correct" } else { "incorrect" },
            self.topic_id,
            progress.mastery_percentage
        );

        if is_correct {
            self.correct_count += 1;
        } else {
            self.incorrect_count += 1;
        }
        self.current_index += 1;
        Ok(Some((is_correct, progress)))
    }

    pub fn is_completed(&self) -> bool {
        self.current_index >= self.items.len()
    }

    /// Counts the drill as one activity for the streak once something was answered.
    pub fn finish(&mut self) -> Result<Option<StreakState>> {
        if self.activity_recorded || self.correct_count + self.incorrect_count == 0 {
            return Ok(None);
        }
        let streak = record_activity(&*lock_store(&self.store)?, self.learner_id, self.today)?;
        self.activity_recorded = true;
        Ok(Some(streak))
    }
}
