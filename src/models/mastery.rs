//! Grammar topic mastery.
//!
//! Mastery only accumulates: every distinct calendar day with a correct answer is
//! worth 20%, and incorrect answers never take anything away. This deliberately
//! differs from vocabulary scheduling, where a miss resets the interval.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Distinct correct days needed for full mastery.
pub const MASTERY_DAYS: u32 = 5;

/// True when a correct answer today adds a new unique day.
pub(crate) fn is_new_correct_day(
    last_correct_date: Option<NaiveDate>,
    today: NaiveDate,
) -> bool {
    last_correct_date != Some(today)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrammarProgress {
    pub topic_id: i64,
    pub mastery_percentage: f64,
    pub exercises_completed: u32,
    pub unique_days_correct: u32,
    pub last_correct_date: Option<NaiveDate>,
    pub last_practiced_at: DateTime<Utc>,
}

pub fn mastery_percentage(unique_days_correct: u32) -> f64 {
    (unique_days_correct as f64 / MASTERY_DAYS as f64 * 100.0).min(100.0)
}

/// Applies one answer to a topic's progress. `None` means the learner has never
/// attempted the topic.
pub fn update_mastery(
    topic_id: i64,
    progress: Option<&GrammarProgress>,
    is_correct: bool,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> GrammarProgress {
    let Some(progress) = progress else {
        let unique_days_correct = u32::from(is_correct);
        return GrammarProgress {
            topic_id,
            mastery_percentage: mastery_percentage(unique_days_correct),
            exercises_completed: 1,
            unique_days_correct,
            last_correct_date: is_correct.then_some(today),
            last_practiced_at: now,
        };
    };

    let mut next = progress.clone();
    next.exercises_completed += 1;
    if is_correct {
        if is_new_correct_day(progress.last_correct_date, today) {
            next.unique_days_correct += 1;
        }
        next.last_correct_date = Some(today);
    }
    next.mastery_percentage = mastery_percentage(next.unique_days_correct);
    next.last_practiced_at = now;
    next
}

/// Exercise difficulty band (1-10 scale) to drill at a given mastery level.
pub fn difficulty_range_for_mastery(mastery_percentage: f64) -> RangeInclusive<u8> {
    if mastery_percentage < 30.0 {
        1..=4
    } else if mastery_percentage < 70.0 {
        3..=7
    } else {
        5..=10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, d).unwrap()
    }

    fn noon(d: u32) -> DateTime<Utc> {
        day(d).and_hms_opt(12, 0, 0).unwrap().and_utc()
    }

    #[test]
    fn test_first_answer_correct() {
        let p = update_mastery(3, None, true, day(1), noon(1));
        assert_eq!(p.topic_id, 3);
        assert_eq!(p.exercises_completed, 1);
        assert_eq!(p.unique_days_correct, 1);
        assert_eq!(p.mastery_percentage, 20.0);
        assert_eq!(p.last_correct_date, Some(day(1)));
        assert_eq!(p.last_practiced_at, noon(1));
    }

    #[test]
    fn test_first_answer_incorrect() {
        let p = update_mastery(3, None, false, day(1), noon(1));
        assert_eq!(p.exercises_completed, 1);
        assert_eq!(p.unique_days_correct, 0);
        assert_eq!(p.mastery_percentage, 0.0);
        assert_eq!(p.last_correct_date, None);
    }

    #[test]
    fn test_incorrect_never_regresses() {
        let p = update_mastery(3, None, true, day(1), noon(1));
        let p = update_mastery(3, Some(&p), false, day(2), noon(2));
        assert_eq!(p.exercises_completed, 2);
        assert_eq!(p.unique_days_correct, 1);
        assert_eq!(p.mastery_percentage, 20.0);
        assert_eq!(p.last_correct_date, Some(day(1)));
        assert_eq!(p.last_practiced_at, noon(2));
    }

    #[test]
    fn test_same_day_counts_once() {
        let mut p = update_mastery(3, None, true, day(1), noon(1));
        for _ in 0..5 {
            p = update_mastery(3, Some(&p), true, day(1), noon(1));
        }
        assert_eq!(p.exercises_completed, 6);
        assert_eq!(p.unique_days_correct, 1);
        assert_eq!(p.mastery_percentage, 20.0);
    }

    #[test]
    fn test_mastery_caps_at_100() {
        let mut p = update_mastery(3, None, true, day(1), noon(1));
        for d in 2..=8 {
            p = update_mastery(3, Some(&p), true, day(d), noon(d));
        }
        assert_eq!(p.unique_days_correct, 8);
        assert_eq!(p.mastery_percentage, 100.0);
    }

    #[test]
    fn test_difficulty_bands() {
        assert_eq!(difficulty_range_for_mastery(0.0), 1..=4);
        assert_eq!(difficulty_range_for_mastery(29.9), 1..=4);
        assert_eq!(difficulty_range_for_mastery(40.0), 3..=7);
        assert_eq!(difficulty_range_for_mastery(70.0), 5..=10);
        assert_eq!(difficulty_range_for_mastery(100.0), 5..=10);
    }
}
