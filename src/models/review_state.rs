//! Per-learner spaced-repetition record for one vocabulary item.
use crate::error::ContentError;
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabularyStatus {
    New,
    Learning,
    Mastered,
}

impl VocabularyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VocabularyStatus::New => "new",
            VocabularyStatus::Learning => "learning",
            VocabularyStatus::Mastered => "mastered",
        }
    }
}

impl FromStr for VocabularyStatus {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(VocabularyStatus::New),
            "learning" => Ok(VocabularyStatus::Learning),
            "mastered" => Ok(VocabularyStatus::Mastered),
            other => Err(ContentError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    pub vocabulary_id: i64,
    pub ease_factor: f64,
    pub interval_days: u32,
    pub repetitions: u32,
    pub next_review_date: NaiveDate,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub times_correct: u32,
    pub times_incorrect: u32,
    pub unique_days_correct: u32,
    pub last_correct_date: Option<NaiveDate>,
    pub status: VocabularyStatus,
}

impl ReviewState {
    /// State for a word the learner has just been introduced to; first due tomorrow.
    pub fn new(vocabulary_id: i64, today: NaiveDate) -> Self {
        Self {
            vocabulary_id,
            ease_factor: DEFAULT_EASE_FACTOR,
            interval_days: 1,
            repetitions: 0,
            next_review_date: today.checked_add_days(Days::new(1)).unwrap_or(today),
            last_reviewed_at: None,
            times_correct: 0,
            times_incorrect: 0,
            unique_days_correct: 0,
            last_correct_date: None,
            status: VocabularyStatus::New,
        }
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_review_date <= today
    }
}
