//! Vocabulary review session over due words.
//! Handles multi-round review with the review scheduler applied to every answer.

use super::{LearningCard, ReviewableVocabItem, StreakState, schedule_review, update_streak};
use crate::config::EngineConfig;
use crate::database::store::{KnowledgeStore, ProgressStore, due_vocabulary};
use crate::error::{Result, StoreError};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::{Arc, Mutex, MutexGuard};

pub(crate) fn lock_store<S: ?Sized>(store: &Arc<Mutex<S>>) -> Result<MutexGuard<'_, S>> {
    store.lock().map_err(|_| StoreError::LockPoisoned)
}

/// Applies one activity event to the learner's streak and writes it back.
pub fn record_activity<S: ProgressStore + ?Sized>(
    store: &S,
    learner_id: i64,
    today: NaiveDate,
) -> Result<StreakState> {
    let current = store.streak(learner_id)?;
    let next = update_streak(&current, today);
    store.save_streak(learner_id, &next)?;
    log::debug!(
        "Learner {} streak {} -> {}",
        learner_id,
        current.current_streak,
        next.current_streak
    );
    Ok(next)
}

/// Manages a review session with multiple rounds.
/// Words answered incorrectly are repeated in subsequent rounds.
pub struct LearningSession<S: ProgressStore> {
    pub learner_id: i64,
    pub all_cards: Vec<LearningCard>,
    pub current_round_cards: Vec<usize>,
    pub current_index: usize,
    pub round_number: usize,
    /// Study day every answer in this session is recorded against.
    pub today: NaiveDate,
    answers_graded: usize,
    store: Arc<Mutex<S>>,
    activity_recorded: bool,
}

impl<S: KnowledgeStore + ProgressStore> LearningSession<S> {
    /// Starts a session over the words due on the store's study date, capped at
    /// the configured batch size.
    pub fn start_due_review(
        learner_id: i64,
        store: Arc<Mutex<S>>,
        config: &EngineConfig,
    ) -> Result<Self> {
        let (today, cards) = {
            let guard = lock_store(&store)?;
            let today = guard.study_date()?;
            let cards = due_vocabulary(&*guard, learner_id, today, config.review_batch_limit)?;
            (today, cards)
        };
        log::info!("Learner {}: {} words due on {}", learner_id, cards.len(), today);
        Ok(Self::new_from_due_cards(learner_id, cards, store, today))
    }
}

impl<S: ProgressStore> LearningSession<S> {
    /// Creates a new session from words that are due for review.
    pub fn new_from_due_cards(
        learner_id: i64,
        cards: Vec<ReviewableVocabItem>,
        store: Arc<Mutex<S>>,
        today: NaiveDate,
    ) -> Self {
        let all_cards: Vec<_> = cards.into_iter().map(LearningCard::new).collect();
        let indices: Vec<usize> = (0..all_cards.len()).collect();

        Self {
            learner_id,
            all_cards,
            current_round_cards: indices,
            current_index: 0,
            round_number: 1,
            today,
            answers_graded: 0,
            store,
            activity_recorded: false,
        }
    }

    pub fn current_card(&self) -> Option<&LearningCard> {
        self.current_round_cards
            .get(self.current_index)
            .and_then(|&idx| self.all_cards.get(idx))
    }

    pub fn next_card(&mut self) {
        if self.current_index + 1 < self.current_round_cards.len() {
            self.current_index += 1;
        } else {
            self.start_next_round();
        }
    }

    /// Starts a new round with the words that were missed.
    /// If none remain, the session is complete.
    fn start_next_round(&mut self) {
        let failed_indices: Vec<usize> = self
            .current_round_cards
            .iter()
            .copied()
            .filter(|&idx| {
                self.all_cards
                    .get(idx)
                    .map(|card| !card.is_learned)
                    .unwrap_or(false)
            })
            .collect();

        if !failed_indices.is_empty() {
            self.current_round_cards = failed_indices;
            self.current_index = 0;
            self.round_number += 1;
        }
    }

    /// Grades the current word, reschedules it and writes the new state back.
    /// The card is only updated once the store has accepted the new state.
    pub fn grade_current_card(&mut self, is_correct: bool, now: DateTime<Utc>) -> Result<()> {
        let Some(&actual_idx) = self.current_round_cards.get(self.current_index) else {
            return Ok(());
        };
        let Some(card) = self.all_cards.get_mut(actual_idx) else {
            return Ok(());
        };

        let next = schedule_review(&card.reviewable.state, is_correct, self.today, now);
        lock_store(&self.store)?.save_review_state(self.learner_id, &next)?;

        if is_correct {
            card.mark_as_learned(now);
        } else {
            card.is_learned = false;
        }
        self.answers_graded += 1;
        log::debug!(
            "Reviewed '{}' ({}): next review {}",
            card.word(),
            if is_correct { "correct" } else { "incorrect" },
            next.next_review_date
        );
        card.reviewable.state = next;
        Ok(())
    }

    pub fn learned_count(&self) -> usize {
        self.current_round_cards
            .iter()
            .filter(|&&idx| {
                self.all_cards
                    .get(idx)
                    .map(|card| card.is_learned)
                    .unwrap_or(false)
            })
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.current_round_cards.len()
    }

    /// True when every word in the current round has been answered correctly.
    pub fn is_completed(&self) -> bool {
        self.current_round_cards.is_empty() || self.learned_count() == self.total_count()
    }

    /// Records the session as one activity for the streak. A session with no
    /// graded answers is not an activity, and later calls are no-ops.
    pub fn finish(&mut self) -> Result<Option<StreakState>> {
        if self.activity_recorded || self.answers_graded == 0 {
            return Ok(None);
        }
        let streak = record_activity(&*lock_store(&self.store)?, self.learner_id, self.today)?;
        self.activity_recorded = true;
        Ok(Some(streak))
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} words", self.round_number, self.total_count())
        } else {
            format!(
                "Round {} (Review): {} words to retry",
                self.round_number,
                self.total_count()
            )
        }
    }
}
