//! SM-2 derived review scheduling for vocabulary.
//!
//! Answers are binary, so the usual 0-5 recall grade collapses onto two fixed
//! qualities:
//! - Correct: quality 4, the top of the binary scale. Interval grows
//!   1 day → 6 days → EF multiplier
//! - Incorrect: quality 2. Interval and repetitions reset
//! - EF is adjusted on every answer and never drops below 1.3
//!
//! Mastery is tracked separately from the interval: a word is mastered once it has
//! been answered correctly on five distinct calendar days, no matter how many times
//! it was answered on each of them.

use super::mastery::{MASTERY_DAYS, is_new_correct_day};
use super::{ReviewState, VocabularyStatus};
use chrono::{DateTime, Days, NaiveDate, Utc};

pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const CORRECT_QUALITY: f64 = 4.0;
pub const INCORRECT_QUALITY: f64 = 2.0;
/// Highest grade a binary answer can earn.
const TOP_QUALITY: f64 = CORRECT_QUALITY;

/// EF' = EF + (0.1 - d * (0.08 + d * 0.02)), where d is the distance from the top grade.
fn adjusted_ease(ease_factor: f64, quality: f64) -> f64 {
    let d = TOP_QUALITY - quality;
    (ease_factor + (0.1 - d * (0.08 + d * 0.02))).max(MIN_EASE_FACTOR)
}

/// Calculates the next review state after one answer.
pub fn schedule_review(
    state: &ReviewState,
    is_correct: bool,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> ReviewState {
    let quality = if is_correct {
        CORRECT_QUALITY
    } else {
        INCORRECT_QUALITY
    };
    let ease_factor = adjusted_ease(state.ease_factor, quality);

    let mut next = state.clone();
    next.ease_factor = ease_factor;
    next.last_reviewed_at = Some(now);

    if is_correct {
        next.times_correct += 1;
        next.interval_days = match state.repetitions {
            0 => 1,
            1 => 6,
            _ => ((state.interval_days as f64 * ease_factor).round() as u32).max(1),
        };
        next.repetitions = state.repetitions + 1;
        if is_new_correct_day(state.last_correct_date, today) {
            next.unique_days_correct += 1;
        }
        next.last_correct_date = Some(today);
    } else {
        next.times_incorrect += 1;
        next.repetitions = 0;
        next.interval_days = 1;
    }

    next.next_review_date = today
        .checked_add_days(Days::new(next.interval_days as u64))
        .unwrap_or(NaiveDate::MAX);

    next.status = if next.unique_days_correct >= MASTERY_DAYS {
        VocabularyStatus::Mastered
    } else {
        VocabularyStatus::Learning
    };

    next
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

    fn fresh() -> ReviewState {
        ReviewState::new(1, day(1))
    }

    #[test]
    fn test_first_review_correct() {
        let next = schedule_review(&fresh(), true, day(2), noon(2));
        assert!((next.ease_factor - 2.6).abs() < 1e-9);
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.repetitions, 1);
        assert_eq!(next.unique_days_correct, 1);
        assert_eq!(next.times_correct, 1);
        assert_eq!(next.status, VocabularyStatus::Learning);
        assert_eq!(next.next_review_date, day(3));
        assert_eq!(next.last_correct_date, Some(day(2)));
        assert_eq!(next.last_reviewed_at, Some(noon(2)));
    }

    #[test]
    fn test_first_review_incorrect() {
        let next = schedule_review(&fresh(), false, day(2), noon(2));
        assert!((next.ease_factor - 2.36).abs() < 1e-9);
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.repetitions, 0);
        assert_eq!(next.times_incorrect, 1);
        assert_eq!(next.unique_days_correct, 0);
        assert_eq!(next.last_correct_date, None);
        assert_eq!(next.status, VocabularyStatus::Learning);
    }

    #[test]
    fn test_second_review() {
        let mut review = fresh();
        review.repetitions = 1;

        let next = schedule_review(&review, true, day(2), noon(2));
        assert_eq!(next.interval_days, 6);
        assert_eq!(next.repetitions, 2);
        assert_eq!(next.next_review_date, day(8));
    }

    #[test]
    fn test_subsequent_review_multiplies_by_new_ease() {
        let mut review = fresh();
        review.repetitions = 2;
        review.interval_days = 6;

        let next = schedule_review(&review, true, day(2), noon(2));
        // round(6 * 2.6) = 16
        assert_eq!(next.interval_days, 16);
        assert_eq!(next.repetitions, 3);
    }

    #[test]
    fn test_incorrect_resets_regardless_of_history() {
        let mut review = fresh();
        review.repetitions = 5;
        review.interval_days = 40;
        review.unique_days_correct = 3;
        review.last_correct_date = Some(day(1));

        let next = schedule_review(&review, false, day(9), noon(9));
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.repetitions, 0);
        assert_eq!(next.unique_days_correct, 3);
        assert_eq!(next.last_correct_date, Some(day(1)));
        assert_eq!(next.next_review_date, day(10));
    }

    #[test]
    fn test_ef_floor() {
        let mut review = fresh();
        review.ease_factor = 1.3;

        for _ in 0..10 {
            review = schedule_review(&review, false, day(2), noon(2));
            assert!(review.ease_factor >= MIN_EASE_FACTOR);
        }
        assert_eq!(review.ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn test_same_day_answers_count_one_unique_day() {
        let mut review = fresh();
        for _ in 0..4 {
            review = schedule_review(&review, true, day(3), noon(3));
        }
        assert_eq!(review.unique_days_correct, 1);
        assert_eq!(review.times_correct, 4);
        assert_eq!(review.repetitions, 4);
    }

    #[test]
    fn test_mastered_after_five_distinct_days() {
        let mut review = fresh();
        for d in 2..6 {
            review = schedule_review(&review, true, day(d), noon(d));
            assert_eq!(review.status, VocabularyStatus::Learning);
        }
        review = schedule_review(&review, true, day(6), noon(6));
        assert_eq!(review.unique_days_correct, 5);
        assert_eq!(review.status, VocabularyStatus::Mastered);

        // a later miss resets the interval but keeps the earned days
        review = schedule_review(&review, false, day(7), noon(7));
        assert_eq!(review.status, VocabularyStatus::Mastered);
        assert_eq!(review.interval_days, 1);
    }
}
