//! A quiz in progress: grades answers and feeds each one back into the scheduler
//! or the mastery tracker.

use super::learning_session::{lock_store, record_activity};
use super::{
    QuizAnswer, QuizQuestion, ReviewState, SourceRef, StreakState, compose_quiz,
    schedule_review, update_mastery,
};
use crate::config::EngineConfig;
use crate::database::store::{KnowledgeStore, ProgressStore, due_vocabulary};
use crate::error::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use std::sync::{Arc, Mutex};

pub struct QuizSession<S: ProgressStore> {
    pub learner_id: i64,
    pub questions: Vec<QuizQuestion>,
    pub current_index: usize,
    pub correct_count: usize,
    pub incorrect_count: usize,
    /// Study day every answer in this quiz is recorded against.
    pub today: NaiveDate,
    store: Arc<Mutex<S>>,
    activity_recorded: bool,
}

impl<S: KnowledgeStore + ProgressStore> QuizSession<S> {
    /// Composes a quiz from the words due on the store's study date and the grammar
    /// catalog, sized by the configured quiz mode.
    pub fn start<R: Rng + ?Sized>(
        learner_id: i64,
        store: Arc<Mutex<S>>,
        config: &EngineConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let count = config.quiz_mode.question_count();
        let (today, vocab, pools) = {
            let guard = lock_store(&store)?;
            let today = guard.study_date()?;
            (
                today,
                due_vocabulary(&*guard, learner_id, today, count / 2)?,
                // no topic can contribute more than the whole quiz
                guard.grammar_pools(count)?,
            )
        };

        let questions = compose_quiz(&vocab, &pools, count, rng);
        if questions.len() < count {
            log::info!(
                "Quiz for learner {} has {} of {} questions",
                learner_id,
                questions.len(),
                count
            );
        }
        Ok(Self::new(learner_id, questions, store, today))
    }
}

impl<S: ProgressStore> QuizSession<S> {
    pub fn new(
        learner_id: i64,
        questions: Vec<QuizQuestion>,
        store: Arc<Mutex<S>>,
        today: NaiveDate,
    ) -> Self {
        Self {
            learner_id,
            questions,
            current_index: 0,
            correct_count: 0,
            incorrect_count: 0,
            today,
            store,
            activity_recorded: false,
        }
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current_index)
    }

    /// Grades the current question, writes the resulting progress back and moves
    /// on. Returns whether the answer was correct, or `None` once the quiz is over.
    pub fn answer(&mut self, answer: &QuizAnswer, now: DateTime<Utc>) -> Result<Option<bool>> {
        let Some(question) = self.questions.get(self.current_index) else {
            return Ok(None);
        };
        let is_correct = question.check(answer);
        let today = self.today;
        let store = lock_store(&self.store)?;

        match question.source {
            SourceRef::Vocabulary { vocabulary_id } => {
                let state = match store.review_state(self.learner_id, vocabulary_id)? {
                    Some(state) => state,
                    None => {
                        log::debug!("No review state for word {}, starting fresh", vocabulary_id);
                        ReviewState::new(vocabulary_id, today)
                    }
                };
                let next = schedule_review(&state, is_correct, today, now);
                store.save_review_state(self.learner_id, &next)?;
            }
            SourceRef::Grammar { topic_id, .. } => {
                let progress = store.grammar_progress(self.learner_id, topic_id)?;
                let next = update_mastery(topic_id, progress.as_ref(), is_correct, today, now);
                store.save_grammar_progress(self.learner_id, &next)?;
            }
        }
        drop(store);

        if is_correct {
            self.correct_count += 1;
        } else {
            self.incorrect_count += 1;
        }
        self.current_index += 1;
        Ok(Some(is_correct))
    }

    pub fn is_completed(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    /// Fraction of answered questions that were correct.
    pub fn accuracy(&self) -> f64 {
        let answered = self.correct_count + self.incorrect_count;
        if answered == 0 {
            0.0
        } else {
            self.correct_count as f64 / answered as f64
        }
    }

    /// Counts the quiz as one activity for the streak. A quiz with no answers is
    /// not an activity, and later calls are no-ops.
    pub fn finish(&mut self) -> Result<Option<StreakState>> {
        if self.activity_recorded || self.correct_count + self.incorrect_count == 0 {
            return Ok(None);
        }
        let streak = record_activity(&*lock_store(&self.store)?, self.learner_id, self.today)?;
        self.activity_recorded = true;
        Ok(Some(streak))
    }
}
