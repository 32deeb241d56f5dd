//! Wrapper for a due word that tracks whether it was passed in the current session.
use super::ReviewableVocabItem;
use chrono::{DateTime, Utc};

#[derive(Clone, Debug)]
pub struct LearningCard {
    pub reviewable: ReviewableVocabItem,
    pub is_learned: bool,
    pub last_learned_at: Option<DateTime<Utc>>,
}

impl LearningCard {
    pub fn new(reviewable: ReviewableVocabItem) -> Self {
        Self {
            reviewable,
            is_learned: false,
            last_learned_at: None,
        }
    }

    pub fn mark_as_learned(&mut self, now: DateTime<Utc>) {
        self.is_learned = true;
        self.last_learned_at = Some(now);
    }

    pub fn word(&self) -> &str {
        &self.reviewable.item.word
    }
}
